//! # basketgraph - Market Basket Explorer
//!
//! The main binary for the basketgraph co-occurrence engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │            apps/basketgraph (THE BINARY)         │
//! │                                                  │
//! │   ┌─────────────┐   ┌──────────┐   ┌──────────┐  │
//! │   │    CLI      │   │  Config  │   │ Presenter│  │
//! │   │   (clap)    │   │  (toml)  │   │  (text)  │  │
//! │   └──────┬──────┘   └────┬─────┘   └────┬─────┘  │
//! │          └───────────────┼──────────────┘        │
//! │                          ▼                       │
//! │                ┌──────────────────┐              │
//! │                │ basketgraph-core │              │
//! │                │   (THE LOGIC)    │              │
//! │                └──────────────────┘              │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! basketgraph -d data/transactions.csv bundles -k 5
//! basketgraph -d data/transactions.csv with "whole milk"
//! basketgraph -d data/transactions.csv explore yogurt --depth 2 -m 10
//! basketgraph --json-mode stats
//! ```

use basketgraph::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing on stderr. BASKETGRAPH_LOG_FORMAT=json enables machine-parseable output.
    let log_format =
        std::env::var("BASKETGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "basketgraph=debug"
    } else {
        "basketgraph=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the basketgraph startup banner.
fn print_banner() {
    println!(
        r#"
  basketgraph v{}
  Market basket co-occurrence explorer

  Exact counts • Deterministic rankings
"#,
        env!("CARGO_PKG_VERSION")
    );
}
