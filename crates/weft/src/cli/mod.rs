//! CLI command implementations.
//!
//! Each subcommand runs the analysis through the public `weft` API and
//! formats one view of the result.

pub mod cycles;
pub mod graph;
pub mod order;
pub mod stats;

use colored::Colorize;
use weft::{Analysis, Diagnostic, Error, LogicalGroup};

/// Parse repeatable `NAME=DIR` group flags.
pub fn parse_groups(raw: &[String]) -> Result<Vec<LogicalGroup>, Error> {
    raw.iter()
        .map(|spec| {
            let (name, prefix) = spec
                .split_once('=')
                .ok_or_else(|| Error::Config(format!("expected NAME=DIR, got \"{spec}\"")))?;
            if name.is_empty() || prefix.is_empty() {
                return Err(Error::Config(format!("expected NAME=DIR, got \"{spec}\"")));
            }
            Ok(LogicalGroup {
                name: name.to_string(),
                prefix: prefix.into(),
            })
        })
        .collect()
}

/// Print collected diagnostics to stderr, most severe layout smells first.
pub fn report_diagnostics(analysis: &Analysis) {
    if analysis.diagnostics.is_empty() {
        return;
    }

    let (smells, noise): (Vec<&Diagnostic>, Vec<&Diagnostic>) = analysis
        .diagnostics
        .iter()
        .partition(|d| d.kind.is_config_smell());

    eprintln!(
        "{} ({}):",
        "Warnings".yellow().bold(),
        analysis.diagnostics.len()
    );
    for diag in smells.iter().chain(noise.iter()) {
        eprintln!("  {} {diag}", "•".yellow());
    }
}
