//! # basketgraph CLI Module
//!
//! This module implements the CLI interface for basketgraph.
//!
//! ## Available Commands
//!
//! - `with` - Top items bought together with an item
//! - `bundles` - Top co-purchased pairs
//! - `pair` - Co-purchase count of two items
//! - `explore` - Related items by hop distance
//! - `items` - List items in the dataset
//! - `stats` - Graph statistics

mod commands;

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// basketgraph - market basket co-occurrence explorer
///
/// Loads a transaction file, groups it into baskets and answers
/// co-purchase questions from the resulting item graph.
#[derive(Parser, Debug)]
#[command(name = "basketgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the transaction file (overrides the config file)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Path to the config file [default: basketgraph.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Items most often bought together with ITEM
    With {
        /// Item name (case-insensitive, partial names allowed)
        item: String,

        /// Number of results
        #[arg(short)]
        k: Option<usize>,
    },

    /// Most frequently co-purchased pairs
    Bundles {
        /// Number of results
        #[arg(short)]
        k: Option<usize>,
    },

    /// How often two items were bought together
    Pair {
        /// First item
        a: String,

        /// Second item
        b: String,

        /// Also check whether the pair reaches this count
        #[arg(short, long)]
        threshold: Option<u64>,
    },

    /// Explore related items breadth-first
    Explore {
        /// Start item
        item: String,

        /// Maximum hop distance
        #[arg(long)]
        depth: Option<usize>,

        /// Minimum co-purchase count for an edge to be followed
        #[arg(short, long)]
        min_weight: Option<u64>,
    },

    /// List items in the dataset
    Items {
        /// Only items containing this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show graph statistics
    Stats {
        /// Number of most connected items to show
        #[arg(long)]
        top: Option<usize>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let defaults = config.defaults;
    let json_mode = cli.json_mode;

    let session = load_session(&config, cli.data.as_deref())?;

    let output = match cli.command {
        Some(Commands::With { item, k }) => {
            cmd_with(&session, json_mode, &item, k.unwrap_or(defaults.top_k))
        }
        Some(Commands::Bundles { k }) => {
            cmd_bundles(&session, json_mode, k.unwrap_or(defaults.top_k))
        }
        Some(Commands::Pair { a, b, threshold }) => cmd_pair(&session, json_mode, &a, &b, threshold),
        Some(Commands::Explore {
            item,
            depth,
            min_weight,
        }) => cmd_explore(
            &session,
            json_mode,
            &item,
            depth.unwrap_or(defaults.max_depth),
            min_weight.unwrap_or(defaults.min_weight),
        ),
        Some(Commands::Items { filter }) => cmd_items(&session, json_mode, filter.as_deref()),
        Some(Commands::Stats { top }) => {
            cmd_stats(&session, json_mode, top.unwrap_or(defaults.top_k))
        }
        None => {
            // No subcommand - show stats by default
            cmd_stats(&session, json_mode, defaults.top_k)
        }
    }?;

    println!("{output}");
    Ok(())
}
