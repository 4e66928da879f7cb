//! # Query Module
//!
//! Structured query types for engine interaction.
//!
//! - Map caller requests to the engine's read operations
//! - Validate parameters before execution (k, depth, weight bounds)
//! - Carry results back in a single serializable outcome type

use crate::primitives::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_WEIGHT, DEFAULT_TOP_K};
use crate::{BasketError, Edge, EdgeWeight, Exploration};
use serde::Serialize;

/// Query operation types supported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryType {
    /// Co-occurrence count of a pair.
    PairFrequency { a: String, b: String },

    /// Whether a pair co-occurred at least `threshold` times.
    OftenCopurchased {
        a: String,
        b: String,
        threshold: EdgeWeight,
    },

    /// Strongest neighbors of a single item.
    TopWithItem { item: String, k: usize },

    /// Strongest pairs in the whole graph.
    TopBundles { k: usize },

    /// Bounded breadth-first exploration.
    Explore {
        start: String,
        max_depth: usize,
        min_weight: EdgeWeight,
    },
}

/// A structured query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The type of query operation.
    pub query_type: QueryType,
}

impl Query {
    /// Create a new query.
    #[must_use]
    pub fn new(query_type: QueryType) -> Self {
        Self { query_type }
    }

    /// Pair frequency helper.
    #[must_use]
    pub fn pair_frequency(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(QueryType::PairFrequency {
            a: a.into(),
            b: b.into(),
        })
    }

    /// Threshold check helper.
    #[must_use]
    pub fn often_copurchased(a: impl Into<String>, b: impl Into<String>, threshold: u64) -> Self {
        Self::new(QueryType::OftenCopurchased {
            a: a.into(),
            b: b.into(),
            threshold: EdgeWeight::new(threshold),
        })
    }

    /// Per-item ranking helper.
    #[must_use]
    pub fn top_with_item(item: impl Into<String>, k: usize) -> Self {
        Self::new(QueryType::TopWithItem {
            item: item.into(),
            k,
        })
    }

    /// Global ranking helper.
    #[must_use]
    pub fn top_bundles(k: usize) -> Self {
        Self::new(QueryType::TopBundles { k })
    }

    /// Exploration helper.
    #[must_use]
    pub fn explore(start: impl Into<String>, max_depth: usize, min_weight: u64) -> Self {
        Self::new(QueryType::Explore {
            start: start.into(),
            max_depth,
            min_weight: EdgeWeight::new(min_weight),
        })
    }

    /// Exploration with default depth and weight bounds.
    #[must_use]
    pub fn explore_default(start: impl Into<String>) -> Self {
        Self::explore(start, DEFAULT_MAX_DEPTH, DEFAULT_MIN_WEIGHT)
    }

    /// Per-item ranking with the default k.
    #[must_use]
    pub fn top_with_item_default(item: impl Into<String>) -> Self {
        Self::top_with_item(item, DEFAULT_TOP_K)
    }

    /// Check caller-supplied parameters.
    ///
    /// The engine itself accepts any parameters; this is for callers that take
    /// them from users. Rejects k < 1, max_depth < 1 and min_weight < 1.
    pub fn validate(&self) -> Result<(), BasketError> {
        match &self.query_type {
            QueryType::TopWithItem { k, .. } | QueryType::TopBundles { k } if *k < 1 => Err(
                BasketError::InvalidQuery("k must be at least 1".to_string()),
            ),
            QueryType::Explore { max_depth, .. } if *max_depth < 1 => Err(
                BasketError::InvalidQuery("max depth must be at least 1".to_string()),
            ),
            QueryType::Explore { min_weight, .. } if min_weight.value() < 1 => Err(
                BasketError::InvalidQuery("min weight must be at least 1".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// Result of executing a `Query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryOutcome {
    PairFrequency {
        a: String,
        b: String,
        weight: EdgeWeight,
    },
    OftenCopurchased {
        a: String,
        b: String,
        weight: EdgeWeight,
        threshold: EdgeWeight,
        often: bool,
    },
    TopWithItem {
        item: String,
        neighbors: Vec<(String, EdgeWeight)>,
    },
    TopBundles {
        bundles: Vec<Edge>,
    },
    Explore(Exploration),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_helpers() {
        assert_eq!(
            Query::pair_frequency("bread", "milk").query_type,
            QueryType::PairFrequency {
                a: "bread".to_string(),
                b: "milk".to_string()
            }
        );
        assert_eq!(
            Query::top_with_item_default("bread").query_type,
            QueryType::TopWithItem {
                item: "bread".to_string(),
                k: DEFAULT_TOP_K
            }
        );
        assert_eq!(
            Query::explore_default("bread").query_type,
            QueryType::Explore {
                start: "bread".to_string(),
                max_depth: DEFAULT_MAX_DEPTH,
                min_weight: EdgeWeight::new(DEFAULT_MIN_WEIGHT)
            }
        );
    }

    #[test]
    fn validate_rejects_zero_k() {
        assert!(matches!(
            Query::top_bundles(0).validate(),
            Err(BasketError::InvalidQuery(_))
        ));
        assert!(Query::top_with_item("bread", 0).validate().is_err());
        assert!(Query::top_bundles(1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_depth_and_weight() {
        assert!(Query::explore("bread", 0, 1).validate().is_err());
        assert!(Query::explore("bread", 1, 0).validate().is_err());
        assert!(Query::explore("bread", 1, 1).validate().is_ok());
    }

    #[test]
    fn pair_queries_always_valid() {
        assert!(Query::pair_frequency("a", "a").validate().is_ok());
        assert!(Query::often_copurchased("a", "b", 0).validate().is_ok());
    }
}
