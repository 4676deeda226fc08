//! `weft graph` command implementation.

use std::path::Path;

use colored::Colorize;
use weft::Weft;

/// Run the graph command: emit the renderer model as JSON.
pub fn run(weft: &Weft, output: Option<&Path>) -> Result<(), weft::Error> {
    let analysis = weft.analyze()?;
    let model = analysis.to_model();

    let json = serde_json::to_string_pretty(&model)
        .map_err(|e| weft::Error::Config(format!("failed to serialize model: {e}")))?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!(
                "{} {} nodes, {} edges to {}",
                "Wrote".green().bold(),
                model.nodes.len(),
                model.edges.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    super::report_diagnostics(&analysis);
    Ok(())
}
