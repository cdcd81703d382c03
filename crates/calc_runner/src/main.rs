//! Route-planning damage calculator.
//!
//! Loads a fight scenario from JSON and prints per-move damage summaries or
//! the exact kill percentage of a turn sequence. Reports can be saved to
//! `.calc_runs/` with versioning.
//!
//! Usage:
//!   cargo run -p calc_runner -- summary scenarios/nidoran_vs_caterpie.json
//!   cargo run -p calc_runner -- kill scenarios/nidoran_vs_caterpie.json --json
//!   RUST_LOG=poke_calc=debug cargo run -p calc_runner -- kill <scenario> --method iterative

mod cmd;
mod models;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::{kill, summary};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calc_runner")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Damage ranges, roll tables and n-hit kill% for every move
    Summary(summary::SummaryArgs),

    /// Exact kill% of the scenario's turn sequence
    Kill(kill::KillArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Summary(args)) => summary::execute(args),
        Some(Commands::Kill(args)) => kill::execute(args),
        None => {
            // Require explicit subcommand to avoid flag ambiguity at the root.
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
