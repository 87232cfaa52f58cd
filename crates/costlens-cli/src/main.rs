//! costlens CLI
//!
//! Command-line interface for diffing cluster cost snapshots

use clap::{Parser, Subcommand};
use costlens_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "costlens")]
#[command(about = "costlens - Explain what changed between two cost reports", long_about = None)]
struct Cli {
    /// Human-readable debug logs on stderr instead of JSON
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two asset snapshots
    Diff(commands::diff::DiffArgs),
    /// Print the resolved label configuration
    Labels(commands::labels::LabelsArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Labels(args) => commands::labels::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
