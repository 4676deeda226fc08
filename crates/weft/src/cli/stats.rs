//! `weft stats` command implementation.

use colored::Colorize;
use weft::Weft;

/// Run the stats command.
pub fn run(weft: &Weft) -> Result<(), weft::Error> {
    let analysis = weft.analyze()?;

    println!("{} {}...", "Analyzed".cyan().bold(), weft.project_root().display());
    println!();
    println!(
        "{} {} files, {} include edges",
        "Graph".green().bold(),
        analysis.graph.node_count(),
        analysis.graph.edge_count()
    );
    println!(
        "{}: {} files included directly by {}",
        "Entry".dimmed(),
        analysis.entry_set.len(),
        weft.entry().display()
    );
    println!("{}: {:.2?}", "Duration".dimmed(), analysis.duration);

    if let Some((identity, metrics)) = analysis
        .metrics
        .iter()
        .max_by_key(|(_, m)| m.indegree)
        .filter(|(_, m)| m.indegree > 0)
    {
        println!(
            "{}: {} ({} dependents)",
            "Most included".dimmed(),
            identity.label(),
            metrics.indegree
        );
    }
    if let Some((identity, metrics)) = analysis
        .metrics
        .iter()
        .max_by_key(|(_, m)| m.outdegree)
        .filter(|(_, m)| m.outdegree > 0)
    {
        println!(
            "{}: {} ({} dependencies)",
            "Most including".dimmed(),
            identity.label(),
            metrics.outdegree
        );
    }

    if !analysis.cycles.is_empty() {
        println!(
            "{}: {}",
            "Cycles".yellow().bold(),
            analysis.cycles.len()
        );
    }

    super::report_diagnostics(&analysis);
    Ok(())
}
