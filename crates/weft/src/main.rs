//! Weft CLI - include dependency graphs from the command line.
//!
//! Weft scans a C/C++ project for quoted includes, resolves them against a
//! configured search path, and prints graph analyses: the renderer model,
//! the topological ordering, cycles, and summary statistics.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Weft: quoted-include dependency graph analyzer.
#[derive(Parser)]
#[command(name = "weft")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Include search directory, in precedence order (repeatable)
    #[arg(short = 'I', long = "include-dir", global = true)]
    include_dirs: Vec<PathBuf>,

    /// Entry translation unit (defaults to the first main.cpp under the root)
    #[arg(short, long, global = true)]
    entry: Option<PathBuf>,

    /// Logical group as NAME=DIR, relative to the root (repeatable)
    #[arg(short, long, global = true)]
    group: Vec<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the attributed node/edge model as JSON for a renderer
    Graph {
        /// Write the model to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the cycle-tolerant topological ordering with degree counts
    Order,

    /// List circular include chains
    Cycles,

    /// Show graph statistics
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    // Determine the project root
    let root = match cli.root {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!(
                    "{}: failed to get current directory: {e}",
                    "error".red().bold()
                );
                return ExitCode::FAILURE;
            }
        },
    };

    let result = cli::parse_groups(&cli.group).and_then(|groups| {
        let weft = weft::Weft::new(&root, cli.include_dirs, cli.entry)?.with_groups(groups);
        match cli.command {
            Commands::Graph { output } => cli::graph::run(&weft, output.as_deref()),
            Commands::Order => cli::order::run(&weft),
            Commands::Cycles => cli::cycles::run(&weft),
            Commands::Stats => cli::stats::run(&weft),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
