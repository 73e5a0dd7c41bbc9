//! scenport CLI — scenario export import analyzer.
//!
//! Reconstructs hierarchical step trees from scenario export files and
//! emits an import-ready analysis for the destination project.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
