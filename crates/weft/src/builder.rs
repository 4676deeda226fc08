//! Dependency graph construction.
//!
//! Orchestrates extraction and resolution across the whole snapshot: for
//! every source file, scan its text for quoted includes, resolve each one,
//! and fold the results into an immutable [`DependencyGraph`]. The entry
//! translation unit is processed separately, solely to populate the entry
//! set; it is a program entry point, not a header, so it never becomes a
//! graph node itself.
//!
//! Extraction and resolution are pure per-file functions with no shared
//! mutable state, so the per-file phase runs under rayon. The input list
//! is sorted by identity first and results are merged in that order, so
//! file-system enumeration order never changes the output.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::error::Diagnostic;
use crate::extract::quoted_includes;
use crate::resolve::{IncludeResolver, Resolution};
use crate::types::{DependencyGraph, FileIdentity, SourceFile};

/// A named directory-prefix bucket of the project layout.
///
/// Groups carry no resolution semantics; they exist so the builder can
/// report headers claimed by more than one bucket, which usually means the
/// search-path configuration is redundant.
#[derive(Debug, Clone)]
pub struct LogicalGroup {
    /// Display name of the group.
    pub name: String,
    /// Directory prefix relative to the project root.
    pub prefix: PathBuf,
}

/// Everything the builder produces for one snapshot.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The assembled dependency relation, covering every source file as a
    /// node plus every resolved include target.
    pub graph: DependencyGraph,
    /// Resolved targets of the entry translation unit's own includes.
    pub entry_set: BTreeSet<FileIdentity>,
    /// Unresolved/ambiguous include reports, in deterministic order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Edges and diagnostics extracted from a single file.
struct FileEdges {
    identity: FileIdentity,
    dependencies: BTreeSet<FileIdentity>,
    diagnostics: Vec<Diagnostic>,
}

/// Build the dependency graph for one snapshot of project files.
///
/// Unresolved includes contribute a diagnostic and no edge; they do not
/// create graph nodes for files outside the project. Resolved targets
/// become nodes even when they were not themselves enumerated (a header
/// pulled in from outside the scanned set still appears, with no outgoing
/// edges).
#[must_use]
pub fn build_graph(
    sources: &[SourceFile],
    entry: Option<&SourceFile>,
    resolver: &IncludeResolver,
) -> BuildOutput {
    // Deterministic input order regardless of how the caller enumerated.
    let mut ordered: Vec<&SourceFile> = sources.iter().collect();
    ordered.sort_by(|a, b| a.identity.cmp(&b.identity));

    let per_file: Vec<FileEdges> = ordered
        .par_iter()
        .map(|source| scan_file(source, resolver))
        .collect();

    let mut graph = DependencyGraph::new();
    let mut diagnostics = Vec::new();
    for file in per_file {
        graph.insert_node(file.identity.clone());
        for dep in file.dependencies {
            graph.insert_edge(file.identity.clone(), dep);
        }
        diagnostics.extend(file.diagnostics);
    }

    let entry_set = match entry {
        Some(entry) => {
            let edges = scan_file(entry, resolver);
            diagnostics.extend(edges.diagnostics);
            edges.dependencies
        }
        None => BTreeSet::new(),
    };

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        entry_includes = entry_set.len(),
        "dependency graph assembled"
    );

    BuildOutput {
        graph,
        entry_set,
        diagnostics,
    }
}

/// Extract and resolve the includes of one file. Pure per-file work.
fn scan_file(source: &SourceFile, resolver: &IncludeResolver) -> FileEdges {
    let mut dependencies = BTreeSet::new();
    let mut diagnostics = Vec::new();

    for raw in quoted_includes(&source.text) {
        match resolver.resolve(&raw, &source.identity) {
            Resolution::Resolved { target, shadowed } => {
                if !shadowed.is_empty() {
                    diagnostics.push(Diagnostic::ambiguous_include(
                        source.identity.as_path().to_path_buf(),
                        &raw,
                        &shadowed,
                    ));
                }
                dependencies.insert(target);
            }
            Resolution::Unresolved => {
                diagnostics.push(Diagnostic::unresolved_include(
                    source.identity.as_path().to_path_buf(),
                    &raw,
                ));
            }
        }
    }

    FileEdges {
        identity: source.identity.clone(),
        dependencies,
        diagnostics,
    }
}

/// Report headers whose project-relative path falls under more than one
/// logical group.
///
/// Membership is informational only and never alters resolution; the
/// diagnostic exists so a redundant layout is visible to the caller.
#[must_use]
pub fn check_group_membership(
    sources: &[SourceFile],
    project_root: &Path,
    groups: &[LogicalGroup],
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if groups.len() < 2 {
        return diagnostics;
    }

    let mut ordered: Vec<&SourceFile> = sources.iter().collect();
    ordered.sort_by(|a, b| a.identity.cmp(&b.identity));

    for source in ordered {
        let Ok(relative) = source.identity.as_path().strip_prefix(project_root) else {
            continue;
        };
        let claiming: Vec<String> = groups
            .iter()
            .filter(|g| relative.starts_with(&g.prefix))
            .map(|g| g.name.clone())
            .collect();
        if claiming.len() > 1 {
            diagnostics.push(Diagnostic::multiple_groups(
                source.identity.as_path().to_path_buf(),
                &claiming,
            ));
        }
    }

    diagnostics
}
