//! `becas.toml` configuration.
//!
//! ```toml
//! catalog = "data/tabuladores.csv"   # optional, embedded catalog otherwise
//!
//! [engine]
//! reference_tuition = 1500
//! min_cap = 14
//! max_cap = 20
//!
//! [logging]
//! level = "info"
//! file = "becas.log"                 # optional
//! ```
//!
//! Every key is optional. The file is looked up at `--config`, then
//! `BECAS_CONFIG_PATH`, then `./becas.toml`; only the last may be absent.

use std::fs;
use std::path::{Path, PathBuf};

use becas_core::{ConfigurationError, EngineConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "BECAS_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "becas.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid engine configuration: {0}")]
    Invalid(#[from] ConfigurationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Append log records to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BecasConfig {
    /// CSV catalog to load instead of the embedded one.
    pub catalog: Option<PathBuf>,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

impl BecasConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(
        contents: &str,
        origin: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Loads the configuration file, falling back to defaults only when
    /// no path was requested and `./becas.toml` does not exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let path = match requested {
            Some(path) => path,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    debug!("no {DEFAULT_CONFIG_PATH} found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Self::from_toml_str(&contents, &path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = BecasConfig::from_toml_str("", Path::new("inline")).unwrap();

        assert_eq!(config, BecasConfig::default());
        assert_eq!(config.engine.reference_tuition, dec!(1500));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_engine_table_keeps_other_defaults() {
        let config = BecasConfig::from_toml_str(
            "[engine]\nreference_tuition = 2000\n",
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(config.engine.reference_tuition, dec!(2000));
        assert_eq!(config.engine.min_cap, 14);
        assert_eq!(config.engine.max_cap, 20);
    }

    #[test]
    fn catalog_and_logging_are_read() {
        let config = BecasConfig::from_toml_str(
            "catalog = \"tabs.csv\"\n[logging]\nlevel = \"debug\"\nfile = \"becas.log\"\n",
            Path::new("inline"),
        )
        .unwrap();

        assert_eq!(config.catalog, Some(PathBuf::from("tabs.csv")));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("becas.log")));
    }

    #[test]
    fn invalid_band_is_rejected() {
        let err = BecasConfig::from_toml_str(
            "[engine]\nmin_cap = 30\nmax_cap = 20\n",
            Path::new("inline"),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid(ConfigurationError::InvalidCapBand { min: 30, max: 20 })
        ));
    }

    #[test]
    fn malformed_toml_reports_origin() {
        let err = BecasConfig::from_toml_str("[engine", Path::new("bad.toml")).unwrap_err();

        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, PathBuf::from("bad.toml")),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = BecasConfig::load(Some(Path::new("/nonexistent/becas.toml"))).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
