//! Error types for the CLI application.

use basketgraph_core::BasketError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or query validation failed in the core
    #[error(transparent)]
    Basket(#[from] BasketError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No item matches the search term
    #[error("'{0}' not found in dataset")]
    ItemNotFound(String),

    /// Several items match the search term
    #[error("'{term}' matches {} items: {}. Please be more specific", .candidates.len(), .candidates.join(", "))]
    AmbiguousItem {
        term: String,
        candidates: Vec<String>,
    },
}
