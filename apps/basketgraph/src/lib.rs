//! # basketgraph
//!
//! Library half of the basketgraph binary: CLI definition, command
//! implementations, configuration and text presentation.

pub mod cli;
pub mod config;
pub mod error;
pub mod presenter;

pub use error::{CliError, Result};
