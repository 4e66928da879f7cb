//! Configuration management for the CLI.
//!
//! Precedence: command-line flags, then the TOML file, then built-in defaults.

use crate::error::{CliError, Result};
use basketgraph_core::Schema;
use basketgraph_core::primitives::{
    DEFAULT_CUSTOMER_FIELD, DEFAULT_DATE_FIELD, DEFAULT_ITEM_FIELD, DEFAULT_MAX_DEPTH,
    DEFAULT_MIN_WEIGHT, DEFAULT_TOP_K,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "basketgraph.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transaction source and its layout
    pub dataset: DatasetConfig,

    /// Query parameters used when a flag is omitted
    pub defaults: QueryDefaults,
}

/// Location and layout of the transaction source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path of the transaction file
    pub path: Option<PathBuf>,

    /// Field delimiter, a single ASCII character
    pub delimiter: String,

    pub customer_field: String,
    pub date_field: String,
    pub item_field: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: ",".to_string(),
            customer_field: DEFAULT_CUSTOMER_FIELD.to_string(),
            date_field: DEFAULT_DATE_FIELD.to_string(),
            item_field: DEFAULT_ITEM_FIELD.to_string(),
        }
    }
}

/// Default query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    pub top_k: usize,
    pub max_depth: usize,
    pub min_weight: u64,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_depth: DEFAULT_MAX_DEPTH,
            min_weight: DEFAULT_MIN_WEIGHT,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `DEFAULT_CONFIG_PATH` when no
    /// path is given.
    ///
    /// A missing default file yields the built-in defaults. A missing file that
    /// was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file '{}' not found",
                        path.display()
                    )));
                }
                Self::read(path)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::read(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Build the loader schema from the `[dataset]` table.
    pub fn schema(&self) -> Result<Schema> {
        let delimiter = match self.dataset.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => *byte,
            _ => {
                return Err(CliError::Config(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    self.dataset.delimiter
                )));
            }
        };

        Ok(Schema::new(
            self.dataset.customer_field.clone(),
            self.dataset.date_field.clone(),
            self.dataset.item_field.clone(),
        )
        .with_delimiter(delimiter))
    }

    /// The dataset to load: `data` if given, otherwise `[dataset].path`.
    pub fn dataset_path(&self, data: Option<&Path>) -> Result<PathBuf> {
        data.map(Path::to_path_buf)
            .or_else(|| self.dataset.path.clone())
            .ok_or_else(|| {
                CliError::Config(
                    "No dataset given. Use --data or set [dataset].path in the config file"
                        .to_string(),
                )
            })
    }
}
