//! knot CLI - finds import cycles made unbuildable by async module
//! initialization and recommends which imports to make dynamic.

mod config;
mod formatters;
mod progress;
mod run;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "knot")]
#[command(
    about = "Find import cycles made unbuildable by async module initialization",
    long_about = None
)]
struct Cli {
    /// Entry point handed to the cycle tool
    ///
    /// Defaults to the configured entry point when omitted.
    #[arg(value_name = "ENTRY")]
    entry_point: Option<PathBuf>,

    /// Path to the bundled build artifact
    #[arg(long, value_name = "FILE")]
    bundle: Option<PathBuf>,

    /// Reuse an existing cycle-membership file instead of regenerating it
    #[arg(long, value_name = "FILE")]
    cycles_file: Option<PathBuf>,

    /// Configuration file path (defaults to .knot.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cap on cycles enumerated by the feedback-arc-set track
    #[arg(long, value_name = "N")]
    max_cycles: Option<usize>,

    /// Cycle-tool timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value = "human")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run::run(&cli)
}

/// Installs the tracing subscriber; `RUST_LOG` overrides the verbosity
/// flag when set.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
