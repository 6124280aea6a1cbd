//! Subcommands of the `becas` binary.
//!
//! Each command reads its inputs the way the assignment form would, runs one
//! engine operation and renders the form values, one `field: value` per line.

use anyhow::{Context, Result};
use becas_core::{
    Assignment, DiscountPercent, Household, Quote, TabuladorCatalog, TabuladorEngine, TabuladorId,
    percent_choices,
};
use becas_data::{TabuladorLoader, default_catalog};
use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::BecasConfig;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Look up the discount for a household income in a tabulador's table.
    Quote {
        /// Household income
        #[arg(long)]
        income: Decimal,

        /// Tabulador (cap percentage), e.g. 14
        #[arg(long)]
        cap: TabuladorId,

        /// Household tuition; the reference tuition when omitted
        #[arg(long)]
        tuition: Option<Decimal>,
    },

    /// Derive the tabulador for a target discount.
    Derive {
        /// Target discount percentage
        #[arg(long)]
        percent: DiscountPercent,

        /// Number of students the household enrols
        #[arg(long, default_value_t = 1)]
        students: u32,

        /// Household income
        #[arg(long)]
        household_income: Decimal,

        /// Tuition per student; the reference tuition when omitted
        #[arg(long)]
        tuition: Option<Decimal>,
    },

    /// Recompute the discount implied by capping each student's share.
    Recalc {
        /// Tabulador (cap percentage), e.g. 16
        #[arg(long)]
        cap: TabuladorId,

        /// Number of students the household enrols
        #[arg(long, default_value_t = 1)]
        students: u32,

        /// Household income
        #[arg(long)]
        household_income: Decimal,

        /// Tuition per student; the reference tuition when omitted
        #[arg(long)]
        tuition: Option<Decimal>,
    },

    /// List the tabulador and percentage options of the assignment form.
    Choices,

    /// Print the catalog, or one tabulador, as CSV.
    Tables {
        #[arg(long)]
        cap: Option<TabuladorId>,
    },
}

/// Loads the catalog named in the configuration, or the embedded one.
pub fn load_catalog(config: &BecasConfig) -> Result<TabuladorCatalog> {
    let catalog = match &config.catalog {
        Some(path) => TabuladorLoader::load_from_file(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
        None => default_catalog().context("Failed to load embedded catalog")?,
    };
    info!(tabuladores = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Runs `command` against `catalog` and returns the text to print.
pub fn run(
    catalog: &TabuladorCatalog,
    config: &BecasConfig,
    command: &Command,
) -> Result<String> {
    let engine = TabuladorEngine::new(catalog, config.engine.clone())?;
    let reference = engine.config().reference_tuition;

    match command {
        Command::Quote {
            income,
            cap,
            tuition,
        } => {
            let quote = match tuition {
                Some(tuition) => engine.select_tabulador_for_tuition(*income, *cap, *tuition)?,
                None => engine.select_tabulador(*income, *cap)?,
            };
            Ok(render_quote(&quote))
        }
        Command::Derive {
            percent,
            students,
            household_income,
            tuition,
        } => {
            let household = Household::new(*students, *household_income)?;
            let assignment = engine.recalculate_from_percent(
                tuition.unwrap_or(reference),
                *percent,
                &household,
            )?;
            Ok(render_assignment(&assignment))
        }
        Command::Recalc {
            cap,
            students,
            household_income,
            tuition,
        } => {
            let household = Household::new(*students, *household_income)?;
            let quote =
                engine.recalculate_from_cap(tuition.unwrap_or(reference), *cap, &household)?;
            Ok(render_quote(&quote))
        }
        Command::Choices => Ok(render_choices(&engine)),
        Command::Tables { cap } => render_tables(catalog, *cap),
    }
}

pub fn render_quote(quote: &Quote) -> String {
    let values = quote.form_values();
    format!("porcentaje: {}\nmonto: {}\n", values.percent, values.amount_due)
}

pub fn render_assignment(assignment: &Assignment) -> String {
    assignment
        .form_fields()
        .into_iter()
        .map(|(name, value)| format!("{name}: {value}\n"))
        .collect()
}

fn render_choices(engine: &TabuladorEngine<'_>) -> String {
    let tabuladores = engine.tabulador_choices().into_iter().map(|choice| {
        let marker = if choice.disabled { " (disabled)" } else { "" };
        format!("  {} = {}{}\n", choice.value, choice.label, marker)
    });
    let percents = percent_choices()
        .into_iter()
        .map(|choice| format!("  {} = {}\n", choice.value, choice.label));

    std::iter::once("tabulador:\n".to_string())
        .chain(tabuladores)
        .chain(std::iter::once("porcentaje:\n".to_string()))
        .chain(percents)
        .collect()
}

fn render_tables(
    catalog: &TabuladorCatalog,
    cap: Option<TabuladorId>,
) -> Result<String> {
    let mut buffer = Vec::new();
    match cap {
        Some(cap) => {
            let table = catalog.get(cap)?.clone();
            let single = TabuladorCatalog::from_tables([(cap, table)])?;
            TabuladorLoader::write(&single, &mut buffer)?;
        }
        None => TabuladorLoader::write(catalog, &mut buffer)?,
    }
    String::from_utf8(buffer).context("catalog CSV is not UTF-8")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn catalog() -> TabuladorCatalog {
        default_catalog().unwrap()
    }

    fn id(cap: u8) -> TabuladorId {
        TabuladorId::new(cap).unwrap()
    }

    #[test]
    fn quote_prints_form_values() {
        let command = Command::Quote {
            income: dec!(800),
            cap: id(14),
            tuition: None,
        };

        let out = run(&catalog(), &BecasConfig::default(), &command).unwrap();

        assert_eq!(out, "porcentaje: 93\nmonto: 105.00\n");
    }

    #[test]
    fn derive_prints_out_of_range_tabulador() {
        let command = Command::Derive {
            percent: DiscountPercent::new(50).unwrap(),
            students: 2,
            household_income: dec!(3000),
            tuition: None,
        };

        let out = run(&catalog(), &BecasConfig::default(), &command).unwrap();

        assert_eq!(out, "tabulador: fuera_rango\nporcentaje: 50\nmonto: 750.00\n");
    }

    #[test]
    fn recalc_uses_given_tuition() {
        let command = Command::Recalc {
            cap: id(14),
            students: 2,
            household_income: dec!(4000),
            tuition: Some(dec!(2000)),
        };

        // share = 4000 × 14% / 2 = 280; (2000 - 280) / 2000 = 86%
        let out = run(&catalog(), &BecasConfig::default(), &command).unwrap();

        assert_eq!(out, "porcentaje: 86\nmonto: 280.00\n");
    }

    #[test]
    fn quote_unknown_tabulador_fails() {
        let command = Command::Quote {
            income: dec!(800),
            cap: id(30),
            tuition: None,
        };

        let err = run(&catalog(), &BecasConfig::default(), &command).unwrap_err();

        assert!(err.to_string().contains("tabulador 30 is not present"));
    }

    #[test]
    fn choices_mark_out_of_range_disabled() {
        let out = run(&catalog(), &BecasConfig::default(), &Command::Choices).unwrap();

        assert!(out.contains("  14 = Asignar 14%\n"));
        assert!(out.contains("  fuera_rango = Fuera del rango (disabled)\n"));
        assert!(out.contains("  100 = 100%\n"));
    }

    #[test]
    fn tables_for_one_cap() {
        let out = run(
            &catalog(),
            &BecasConfig::default(),
            &Command::Tables { cap: Some(id(14)) },
        )
        .unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "tabulador,upper_income_bound,discount_percent");
        assert_eq!(lines.len(), 55);
        assert!(lines.contains(&"14,900,93"));
        assert_eq!(lines[54], "14,,0");
    }
}
