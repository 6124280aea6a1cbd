use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use becas_cli::app::{self, Command};
use becas_cli::config::BecasConfig;
use becas_cli::logging;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tabulador lookups for scholarship (beca) assignments.
///
/// Loads the tabulador catalog, runs one calculation and prints the values
/// the assignment form would receive.
#[derive(Debug, Parser)]
#[command(name = "becas")]
struct Cli {
    /// Configuration file. Defaults to `$BECAS_CONFIG_PATH`, then `./becas.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = BecasConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;
    debug!(?config, "configuration resolved");

    let catalog = app::load_catalog(&config)?;
    let output = app::run(&catalog, &config, &cli.command)?;
    print!("{output}");

    Ok(())
}
