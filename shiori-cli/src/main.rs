//! shiori command-line entry point

use clap::Parser;
use shiori_cli::commands::Commands;
use shiori_cli::CliResult;

/// Language-aware tokenization for reading texts
#[derive(Debug, Parser)]
#[command(name = "shiori", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    Cli::parse().command.execute()
}
