//! `weft cycles` command implementation.

use colored::Colorize;
use weft::Weft;

/// Run the cycles command.
pub fn run(weft: &Weft) -> Result<(), weft::Error> {
    let analysis = weft.analyze()?;

    if analysis.cycles.is_empty() {
        println!("{}", "No circular includes detected.".green());
        return Ok(());
    }

    println!(
        "Found {} circular include chains:",
        analysis.cycles.len().to_string().red().bold()
    );
    println!();

    for (i, cycle) in analysis.cycles.iter().enumerate() {
        println!("  {} {}:", "Cycle".yellow().bold(), i + 1);

        // Display cycle as: a -> b -> c -> a
        let mut path_str = cycle
            .members
            .iter()
            .map(weft::FileIdentity::label)
            .collect::<Vec<_>>()
            .join(" → ");

        // Repeat the first file to show the cycle closes
        if let Some(first) = cycle.members.first() {
            path_str.push_str(" → ");
            path_str.push_str(&first.label());
        }

        println!("    {}", path_str.dimmed());
    }

    Ok(())
}
