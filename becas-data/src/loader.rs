use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use becas_core::{
    ConfigurationError, DiscountPercent, DiscountTable, DiscountTier, TabuladorCatalog,
    TabuladorId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog shipped with the crate: one table per cap 14..=20, written for a
/// tuition of 1500.
const DEFAULT_CATALOG_CSV: &str = include_str!("../data/tabuladores.csv");

/// Errors that can occur when loading tabulador data.
#[derive(Debug, Error)]
pub enum TabuladorLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("CSV write error: {0}")]
    CsvWrite(String),

    #[error("Cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tabulador identifier: {0}")]
    InvalidTabulador(String),

    #[error("Invalid discount percent {percent} in tabulador {tabulador}")]
    InvalidPercent { tabulador: TabuladorId, percent: i64 },

    #[error("Tabulador {tabulador} is malformed: {source}")]
    InvalidTable {
        tabulador: TabuladorId,
        #[source]
        source: ConfigurationError,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] ConfigurationError),
}

impl From<csv::Error> for TabuladorLoaderError {
    fn from(err: csv::Error) -> Self {
        TabuladorLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a tabulador CSV file.
///
/// - `tabulador`: identifier such as `14`, `14%` or `14_percent`
/// - `upper_income_bound`: exclusive bound (empty for the sentinel tier)
/// - `discount_percent`: whole percentage, 0 to 100
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabuladorRecord {
    pub tabulador: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_income_bound: Option<Decimal>,
    pub discount_percent: i64,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for tabulador catalogs stored as CSV.
///
/// Rows for one tabulador must appear in ascending bound order and end with
/// the sentinel row. Rows for different tabuladores may be interleaved.
pub struct TabuladorLoader;

impl TabuladorLoader {
    /// Parse records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TabuladorRecord>, TabuladorLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TabuladorRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by tabulador, validate each table and assemble the
    /// catalog.
    pub fn build_catalog(
        records: &[TabuladorRecord]
    ) -> Result<TabuladorCatalog, TabuladorLoaderError> {
        let mut groups: BTreeMap<TabuladorId, Vec<DiscountTier>> = BTreeMap::new();

        for record in records {
            let tabulador: TabuladorId = record
                .tabulador
                .parse()
                .map_err(|_| TabuladorLoaderError::InvalidTabulador(record.tabulador.clone()))?;
            let discount_percent = DiscountPercent::new(record.discount_percent).map_err(|_| {
                TabuladorLoaderError::InvalidPercent {
                    tabulador,
                    percent: record.discount_percent,
                }
            })?;

            groups.entry(tabulador).or_default().push(DiscountTier {
                upper_income_bound: record.upper_income_bound,
                discount_percent,
            });
        }

        let mut tables = Vec::with_capacity(groups.len());
        for (tabulador, tiers) in groups {
            let table = DiscountTable::new(tiers)
                .map_err(|source| TabuladorLoaderError::InvalidTable { tabulador, source })?;
            tables.push((tabulador, table));
        }

        Ok(TabuladorCatalog::from_tables(tables)?)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<TabuladorCatalog, TabuladorLoaderError> {
        let records = Self::parse(reader)?;
        Self::build_catalog(&records)
    }

    /// Load a catalog from a CSV file on disk.
    pub fn load_from_file(path: &Path) -> Result<TabuladorCatalog, TabuladorLoaderError> {
        let file = File::open(path).map_err(|source| TabuladorLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(file)
    }

    /// Write `catalog` as CSV in the same layout [`Self::parse`] reads.
    pub fn write<W: Write>(
        catalog: &TabuladorCatalog,
        writer: W,
    ) -> Result<(), TabuladorLoaderError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for (tabulador, table) in catalog.iter() {
            for tier in table.tiers() {
                csv_writer
                    .serialize(TabuladorRecord {
                        tabulador: tabulador.to_string(),
                        upper_income_bound: tier.upper_income_bound,
                        discount_percent: i64::from(tier.discount_percent.value()),
                    })
                    .map_err(|e| TabuladorLoaderError::CsvWrite(e.to_string()))?;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| TabuladorLoaderError::CsvWrite(e.to_string()))
    }
}

/// The embedded catalog.
pub fn default_catalog() -> Result<TabuladorCatalog, TabuladorLoaderError> {
    TabuladorLoader::load(DEFAULT_CATALOG_CSV.as_bytes())
}
