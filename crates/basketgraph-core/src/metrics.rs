//! # Graph Metrics
//!
//! Aggregate statistics over a co-occurrence graph.
//!
//! All ratios are fixed-point integers (`_millionths`, `_millis`); no floating
//! point is used anywhere in this module.

use crate::graph::CooccurrenceStore;
use crate::primitives::WEIGHT_BUCKET_BOUNDS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// GRAPH METRICS
// =============================================================================

/// Summary counts of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphMetrics {
    /// Number of items with at least one neighbor.
    pub item_count: usize,
    /// Number of unordered pairs.
    pub edge_count: usize,
    /// Sum of all edge weights.
    pub total_weight: u64,
    /// Smallest edge weight (0 for an empty graph).
    pub min_weight: u64,
    /// Largest edge weight (0 for an empty graph).
    pub max_weight: u64,
    /// Fraction of possible pairs present: 2E / (V(V-1)), times 1_000_000.
    pub density_millionths: u64,
    /// Mean neighbor count: 2E / V, times 1_000.
    pub average_degree_millis: u64,
}

impl GraphMetrics {
    /// Compute metrics from any store.
    #[must_use]
    pub fn from_store<G: CooccurrenceStore + ?Sized>(store: &G) -> Self {
        let item_count = store.item_count();
        let edges = store.edges();
        let edge_count = edges.len();

        let mut total_weight = 0u64;
        let mut min_weight = u64::MAX;
        let mut max_weight = 0u64;
        for edge in &edges {
            let value = edge.weight.value();
            total_weight = total_weight.saturating_add(value);
            min_weight = min_weight.min(value);
            max_weight = max_weight.max(value);
        }
        if edges.is_empty() {
            min_weight = 0;
        }

        let v = item_count as u64;
        let double_e = (edge_count as u64).saturating_mul(2);

        let density_millionths = if v >= 2 {
            double_e.saturating_mul(1_000_000) / v.saturating_mul(v - 1)
        } else {
            0
        };

        let average_degree_millis = if v > 0 {
            double_e.saturating_mul(1_000) / v
        } else {
            0
        };

        Self {
            item_count,
            edge_count,
            total_weight,
            min_weight,
            max_weight,
            density_millionths,
            average_degree_millis,
        }
    }

    /// Density as parts per thousand.
    #[must_use]
    pub fn density_per_thousand(&self) -> u64 {
        self.density_millionths / 1000
    }
}

// =============================================================================
// DEGREE RANKING
// =============================================================================

/// Connectivity of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDegree {
    pub item: String,
    /// Number of distinct neighbors.
    pub degree: usize,
    /// Sum of the weights of all incident edges.
    pub total_weight: u64,
}

/// The `limit` most connected items.
///
/// Ordered by total incident weight descending, then degree descending, then
/// item name ascending.
#[must_use]
pub fn degree_ranking<G: CooccurrenceStore + ?Sized>(store: &G, limit: usize) -> Vec<ItemDegree> {
    let mut ranking: Vec<ItemDegree> = store
        .items()
        .into_iter()
        .map(|item| {
            let neighbors = store.neighbors(item);
            let total_weight = neighbors
                .iter()
                .fold(0u64, |acc, (_, weight)| acc.saturating_add(weight.value()));
            ItemDegree {
                item: item.to_string(),
                degree: neighbors.len(),
                total_weight,
            }
        })
        .collect();

    ranking.sort_by(|x, y| {
        y.total_weight
            .cmp(&x.total_weight)
            .then_with(|| y.degree.cmp(&x.degree))
            .then_with(|| x.item.cmp(&y.item))
    });
    ranking.truncate(limit);
    ranking
}

// =============================================================================
// WEIGHT HISTOGRAM
// =============================================================================

/// One bucket of the edge-weight histogram. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightBucket {
    pub lower: u64,
    /// `None` for the final open-ended bucket.
    pub upper: Option<u64>,
    pub count: usize,
}

impl WeightBucket {
    fn holds(&self, weight: u64) -> bool {
        weight >= self.lower && self.upper.is_none_or(|upper| weight <= upper)
    }
}

impl std::fmt::Display for WeightBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{}-{}", self.lower, upper),
            None => write!(f, "{}+", self.lower),
        }
    }
}

/// Distribution of edge weights over the fixed buckets in
/// `WEIGHT_BUCKET_BOUNDS`. Every bucket is present, empty or not.
#[must_use]
pub fn weight_histogram<G: CooccurrenceStore + ?Sized>(store: &G) -> Vec<WeightBucket> {
    let mut buckets = Vec::with_capacity(WEIGHT_BUCKET_BOUNDS.len() + 1);
    let mut lower = 1u64;
    for upper in WEIGHT_BUCKET_BOUNDS {
        buckets.push(WeightBucket {
            lower,
            upper: Some(upper),
            count: 0,
        });
        lower = upper.saturating_add(1);
    }
    buckets.push(WeightBucket {
        lower,
        upper: None,
        count: 0,
    });

    for edge in store.edges() {
        let weight = edge.weight.value();
        if let Some(bucket) = buckets.iter_mut().find(|b| b.holds(weight)) {
            bucket.count = bucket.count.saturating_add(1);
        }
    }

    buckets
}

// =============================================================================
// CONNECTED COMPONENTS
// =============================================================================

/// Groups of items reachable from one another.
///
/// Largest component first; equal sizes are ordered by their smallest item.
#[must_use]
pub fn connected_components<G: CooccurrenceStore + ?Sized>(store: &G) -> Vec<BTreeSet<String>> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut components: Vec<BTreeSet<String>> = Vec::new();

    for root in store.items() {
        if !seen.insert(root) {
            continue;
        }

        let mut component = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            component.insert(current.to_string());
            for (neighbor, _) in store.neighbors(current) {
                if seen.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        components.push(component);
    }

    // Stable sort keeps ascending-root order among equal sizes; roots are
    // visited ascending, so that is the smallest-item order.
    components.sort_by(|x, y| y.len().cmp(&x.len()));
    components
}

// =============================================================================
// TESTS
// =============================================================================
