//! `weft order` command implementation.

use colored::Colorize;
use weft::Weft;

/// Run the order command: print the cycle-tolerant topological ordering.
pub fn run(weft: &Weft) -> Result<(), weft::Error> {
    let analysis = weft.analyze()?;

    println!(
        "{} ({} files):",
        "Topological order".cyan().bold(),
        analysis.order.sequence.len()
    );

    for (position, identity) in analysis.order.sequence.iter().enumerate() {
        let metrics = analysis.metrics.get(identity).copied().unwrap_or_default();
        let in_cycle = position >= analysis.order.acyclic_len;

        let line = format!(
            "  {:>4}  in:{:<3} out:{:<3} {}",
            position + 1,
            metrics.indegree,
            metrics.outdegree,
            identity.label()
        );
        if in_cycle {
            println!("{} {}", line.yellow(), "(cycle)".yellow().dimmed());
        } else {
            println!("{line}");
        }
    }

    if analysis.order.cyclic() {
        println!(
            "\n{}: {} files could not be linearized",
            "Cyclic".yellow().bold(),
            analysis.order.cyclic_fallback().len()
        );
    }

    super::report_diagnostics(&analysis);
    Ok(())
}
