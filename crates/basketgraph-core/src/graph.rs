//! # Graph Engine
//!
//! The weighted, undirected co-occurrence graph.
//!
//! This module defines the `CooccurrenceStore` read contract and its in-memory
//! implementation. All data structures use `BTreeMap` for deterministic ordering.

use crate::{Basket, Edge, EdgeWeight};
use std::collections::BTreeMap;

// =============================================================================
// COOCCURRENCE STORE TRAIT
// =============================================================================

/// Read contract of a co-occurrence graph.
///
/// Every query in this crate goes through this trait. None of these methods can
/// fail: unknown items simply have no neighbors and zero weights.
pub trait CooccurrenceStore {
    /// Weight of the unordered pair {a, b}. Zero for unknown items, unseen pairs
    /// and `a == b`.
    fn weight(&self, a: &str, b: &str) -> EdgeWeight;

    /// All items co-observed with `item`, in ascending name order.
    fn neighbors(&self, item: &str) -> Vec<(&str, EdgeWeight)>;

    /// Every unordered pair with weight > 0, exactly once, as `a < b`.
    fn edges(&self) -> Vec<Edge>;

    /// Whether `item` appears in the graph.
    fn contains_item(&self, item: &str) -> bool;

    /// All items in ascending order.
    fn items(&self) -> Vec<&str>;

    /// Total number of items.
    fn item_count(&self) -> usize;

    /// Total number of unordered pairs.
    fn edge_count(&self) -> usize;

    /// Number of distinct items co-observed with `item`.
    fn degree(&self, item: &str) -> usize {
        self.neighbors(item).len()
    }
}

// =============================================================================
// GRAPH IMPLEMENTATION
// =============================================================================

/// The in-memory co-occurrence graph.
///
/// Stored as a symmetric adjacency map: `adjacency[a][b] == adjacency[b][a]`.
/// An item is present as a key only once it has been paired with another item,
/// so every key has at least one neighbor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CooccurrenceGraph {
    /// item -> (neighbor -> weight)
    adjacency: BTreeMap<String, BTreeMap<String, EdgeWeight>>,
}

impl CooccurrenceGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one basket into the graph.
    ///
    /// Every unordered pair of distinct items gains 1 in both directions.
    /// Baskets with fewer than two items change nothing.
    ///
    /// # Cost
    ///
    /// O(n²) in the basket size n, since all C(n, 2) pairs are visited. Retail
    /// baskets hold tens of items, but a basket with thousands of items will
    /// take quadratically longer.
    pub fn update(&mut self, basket: &Basket) {
        let items = basket.items();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                // Basket guarantees distinct items.
                self.increment_pair(a, b);
                self.increment_pair(b, a);
            }
        }
    }

    /// Fold a sequence of baskets. Returns how many baskets were applied.
    pub fn update_all<'b, I>(&mut self, baskets: I) -> usize
    where
        I: IntoIterator<Item = &'b Basket>,
    {
        let mut applied = 0usize;
        for basket in baskets {
            self.update(basket);
            applied = applied.saturating_add(1);
        }
        applied
    }

    /// Build a graph from scratch out of a sequence of baskets.
    #[must_use]
    pub fn from_baskets<'b, I>(baskets: I) -> Self
    where
        I: IntoIterator<Item = &'b Basket>,
    {
        let mut graph = Self::new();
        graph.update_all(baskets);
        graph
    }

    /// Whether the graph holds no items at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Neighbors of `item` (iterator version for algorithms).
    pub fn neighbors_iter<'g>(
        &'g self,
        item: &str,
    ) -> impl Iterator<Item = (&'g str, EdgeWeight)> + use<'g> {
        self.adjacency
            .get(item)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    fn increment_pair(&mut self, from: &str, to: &str) {
        let targets = self.adjacency.entry(from.to_string()).or_default();
        match targets.get_mut(to) {
            Some(weight) => *weight = weight.increment(),
            None => {
                targets.insert(to.to_string(), EdgeWeight::ZERO.increment());
            }
        }
    }
}

impl CooccurrenceStore for CooccurrenceGraph {
    fn weight(&self, a: &str, b: &str) -> EdgeWeight {
        if a == b {
            return EdgeWeight::ZERO;
        }
        self.adjacency
            .get(a)
            .and_then(|targets| targets.get(b).copied())
            .unwrap_or(EdgeWeight::ZERO)
    }

    fn neighbors(&self, item: &str) -> Vec<(&str, EdgeWeight)> {
        self.neighbors_iter(item).collect()
    }

    fn edges(&self) -> Vec<Edge> {
        // The map is symmetric, so keeping only a < b lists each pair once.
        self.adjacency
            .iter()
            .flat_map(|(a, targets)| {
                targets
                    .range::<str, _>((
                        std::ops::Bound::Excluded(a.as_str()),
                        std::ops::Bound::Unbounded,
                    ))
                    .map(move |(b, weight)| Edge {
                        a: a.clone(),
                        b: b.clone(),
                        weight: *weight,
                    })
            })
            .collect()
    }

    fn contains_item(&self, item: &str) -> bool {
        self.adjacency.contains_key(item)
    }

    fn items(&self) -> Vec<&str> {
        self.adjacency.keys().map(String::as_str).collect()
    }

    fn item_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    fn degree(&self, item: &str) -> usize {
        self.adjacency.get(item).map_or(0, BTreeMap::len)
    }
}

// =============================================================================
// TESTS
// =============================================================================
