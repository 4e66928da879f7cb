//! # Core Type Definitions
//!
//! This module contains all core types for the basketgraph co-occurrence engine:
//! - Basket representation (`Basket`, `TransactionRecord`)
//! - Graph weights and canonical edges (`EdgeWeight`, `Edge`)
//! - Traversal output (`Exploration`)
//! - Error types (`BasketError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Use saturating arithmetic for counters to prevent overflow

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// EDGE WEIGHT
// =============================================================================

/// Weight of an undirected co-occurrence edge.
///
/// Counts the number of baskets in which both endpoints appeared.
/// Weights only ever grow; there is no decrement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct EdgeWeight(pub u64);

impl EdgeWeight {
    /// The weight of a pair that was never co-observed.
    pub const ZERO: Self = Self(0);

    /// Create a new edge weight with the given value.
    #[must_use]
    pub const fn new(weight: u64) -> Self {
        Self(weight)
    }

    /// Increment the edge weight by 1 using saturating arithmetic.
    /// This is the ONLY allowed mutation for edge weights.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get the raw weight value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EdgeWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// BASKET
// =============================================================================

/// One customer's purchases on one date.
///
/// Items are kept sorted and deduplicated, so a `Basket` behaves as a set
/// whose iteration order is deterministic. Item identity is exact string
/// equality; no case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Basket(Vec<String>);

impl Basket {
    /// Build a basket from any collection of items.
    ///
    /// Duplicates are dropped and the result is sorted lexicographically.
    #[must_use]
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = items.into_iter().map(Into::into).collect();
        Self(set.into_iter().collect())
    }

    /// The items of this basket in ascending order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the basket contains `item` (exact match).
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.0
            .binary_search_by(|probe| probe.as_str().cmp(item))
            .is_ok()
    }

    /// Number of unordered pairs this basket contributes: C(n, 2).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        let n = self.0.len();
        n.saturating_mul(n.saturating_sub(1)) / 2
    }
}

impl From<BTreeSet<String>> for Basket {
    fn from(set: BTreeSet<String>) -> Self {
        Self(set.into_iter().collect())
    }
}

// =============================================================================
// TRANSACTION RECORD
// =============================================================================

/// A single raw row of the transaction input.
///
/// Customer and date are opaque grouping keys, taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Customer identifier (opaque).
    pub customer: String,
    /// Purchase date (opaque, never parsed).
    pub date: String,
    /// Free-text item description.
    pub item: String,
}

impl TransactionRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        customer: impl Into<String>,
        date: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self {
            customer: customer.into(),
            date: date.into(),
            item: item.into(),
        }
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// A canonical co-occurrence edge: `a < b` lexicographically.
///
/// Each unordered pair is listed exactly once in this form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub a: String,
    pub b: String,
    pub weight: EdgeWeight,
}

impl Edge {
    /// Build an edge in canonical orientation regardless of argument order.
    #[must_use]
    pub fn canonical(x: impl Into<String>, y: impl Into<String>, weight: EdgeWeight) -> Self {
        let (x, y) = (x.into(), y.into());
        if x <= y {
            Self { a: x, b: y, weight }
        } else {
            Self { a: y, b: x, weight }
        }
    }

    /// Tuple view, handy for assertions and presentation.
    #[must_use]
    pub fn as_tuple(&self) -> (&str, &str, u64) {
        (&self.a, &self.b, self.weight.value())
    }
}

// =============================================================================
// EXPLORATION
// =============================================================================

/// Output of a bounded breadth-first exploration.
///
/// `levels` maps hop distance (starting at 1) to the items first discovered at
/// that distance. A depth is only present if something was discovered there,
/// and the start item never appears in any level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exploration {
    pub start: String,
    pub levels: BTreeMap<usize, BTreeSet<String>>,
}

impl Exploration {
    /// An exploration that discovered nothing.
    #[must_use]
    pub fn empty(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            levels: BTreeMap::new(),
        }
    }

    /// Items at the given depth, if any were found there.
    #[must_use]
    pub fn at_depth(&self, depth: usize) -> Option<&BTreeSet<String>> {
        self.levels.get(&depth)
    }

    /// Total number of discovered items across all depths.
    #[must_use]
    pub fn discovered(&self) -> usize {
        self.levels.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(BTreeSet::is_empty)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the basketgraph core.
///
/// Only loading and parameter validation can fail. Query-time absence of data
/// (unknown items, empty graphs) is represented by zero or empty results and
/// never by an error.
#[derive(Debug, Error)]
pub enum BasketError {
    /// The transaction source does not exist.
    #[error("Transaction source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The header is missing one or more required fields.
    #[error("Transaction source is missing required field(s): {}", .missing.join(", "))]
    SchemaError { missing: Vec<String> },

    /// A data row could not be read.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// An I/O error occurred while reading the source.
    #[error("I/O error: {0}")]
    Io(String),

    /// Query parameters are out of range.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// A session built from memory has no source to reload from.
    #[error("Session has no transaction source to reload")]
    NoSource,
}

// =============================================================================
// TESTS
// =============================================================================
