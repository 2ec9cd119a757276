//! Sortscope CLI - watch textbook sorts run one step at a time.

mod commands;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sortscope")]
#[command(author, version, about = "Step-by-step sorting algorithm visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shuffle an array and sort it with one algorithm
    Run(commands::run::RunArgs),

    /// List available algorithms and their complexities
    Algorithms(commands::algorithms::AlgorithmsArgs),

    /// Inspect or create the settings file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `run --json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Algorithms(args) => commands::algorithms::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
