use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use becas_data::{TabuladorLoader, default_catalog};
use clap::Parser;

/// Validate a tabulador catalog CSV file.
///
/// The CSV file should have the following columns:
/// - tabulador: The tabulador identifier (e.g., 14 or 14_percent)
/// - upper_income_bound: Exclusive income bound (empty for the sentinel tier)
/// - discount_percent: Whole discount percentage, 0 to 100
#[derive(Parser, Debug)]
#[command(name = "tabulador-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file; the embedded catalog is checked when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the validated catalog back out as CSV
    #[arg(short, long, default_value_t = false)]
    dump: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let catalog = match &args.file {
        Some(path) => {
            println!("Checking tabuladores in: {}", path.display());
            TabuladorLoader::load_from_file(path)
                .with_context(|| format!("Invalid catalog: {}", path.display()))?
        }
        None => {
            println!("Checking embedded tabuladores");
            default_catalog().context("Embedded catalog is invalid")?
        }
    };

    for (tabulador, table) in catalog.iter() {
        println!("  tabulador {:>3}: {} tiers", tabulador, table.len());
    }
    println!("Catalog is valid ({} tabuladores).", catalog.len());

    if args.dump {
        TabuladorLoader::write(&catalog, io::stdout().lock()).context("Failed to write CSV")?;
    }

    Ok(())
}
