//! # basketgraph-core
//!
//! The deterministic co-occurrence engine for basketgraph.
//!
//! Transaction records are grouped into baskets (one per customer per date),
//! baskets are folded into a weighted undirected graph whose edge weight counts
//! how many baskets held both items, and the graph answers ranking and
//! traversal queries.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: NO async, NO network, NO logging
//! - Deterministic: `BTreeMap`/`BTreeSet` only, integer arithmetic only
//! - In-memory: the graph is rebuilt from its source, never persisted
//! - Query-time absence of data is a zero or empty result, never an error

// =============================================================================
// MODULES
// =============================================================================

pub mod engine;
pub mod graph;
pub mod loader;
pub mod metrics;
pub mod primitives;
pub mod query;
pub mod search;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Basket, BasketError, Edge, EdgeWeight, Exploration, TransactionRecord};

// =============================================================================
// RE-EXPORTS: Graph Engine
// =============================================================================

pub use engine::QueryEngine;
pub use graph::{CooccurrenceGraph, CooccurrenceStore};
pub use loader::{BasketBuilder, Schema, load_baskets};
pub use query::{Query, QueryOutcome, QueryType};
pub use session::{Session, Source};

// =============================================================================
// RE-EXPORTS: Analysis
// =============================================================================

pub use metrics::{
    GraphMetrics, ItemDegree, WeightBucket, connected_components, degree_ranking,
    weight_histogram,
};
pub use search::{ItemMatch, filter_items, resolve_item};
