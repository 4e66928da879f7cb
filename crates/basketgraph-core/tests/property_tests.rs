//! # Property-Based Tests
//!
//! Invariants of the co-occurrence graph and its queries, checked with
//! proptest over randomly generated baskets.

use basketgraph_core::{Basket, CooccurrenceGraph, CooccurrenceStore, EdgeWeight, QueryEngine};
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Small alphabet so that generated baskets overlap.
fn item() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

fn basket() -> impl Strategy<Value = Basket> {
    vec(item(), 0..8).prop_map(Basket::new)
}

fn baskets() -> impl Strategy<Value = Vec<Basket>> {
    vec(basket(), 0..30)
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// weight(a, b) == weight(b, a) after any sequence of updates.
    #[test]
    fn weights_are_symmetric(baskets in baskets()) {
        let graph = CooccurrenceGraph::from_baskets(&baskets);
        for a in graph.items() {
            for (b, weight) in graph.neighbors(a) {
                prop_assert_eq!(weight, graph.weight(b, a));
            }
        }
    }

    /// No item is ever its own neighbor.
    #[test]
    fn no_self_loops(baskets in baskets(), probe in item()) {
        let graph = CooccurrenceGraph::from_baskets(&baskets);
        prop_assert_eq!(graph.weight(&probe, &probe), EdgeWeight::ZERO);
        for a in graph.items() {
            prop_assert!(graph.neighbors(a).iter().all(|(b, _)| *b != a));
        }
    }

    /// The same pair seen in N baskets has weight exactly N.
    #[test]
    fn weights_accumulate_linearly(n in 1usize..50, extra in vec(item(), 0..5)) {
        let mut graph = CooccurrenceGraph::new();
        let mut items = extra;
        items.push("pair-x".to_string());
        items.push("pair-y".to_string());
        let basket = Basket::new(items);

        for _ in 0..n {
            graph.update(&basket);
        }
        prop_assert_eq!(graph.weight("pair-x", "pair-y").value(), n as u64);
    }

    /// A basket of n distinct items yields C(n, 2) canonical edges of weight 1.
    #[test]
    fn single_basket_yields_all_pairs(items in btree_set(item(), 0..10)) {
        let n = items.len();
        let basket = Basket::from(items);
        let graph = CooccurrenceGraph::from_baskets([&basket]);
        let edges = graph.edges();

        prop_assert_eq!(edges.len(), n * n.saturating_sub(1) / 2);
        for edge in &edges {
            prop_assert!(edge.a < edge.b);
            prop_assert_eq!(edge.weight.value(), 1);
        }
    }

    /// edges() never lists a pair twice, in either orientation.
    #[test]
    fn edges_unique(baskets in baskets()) {
        let graph = CooccurrenceGraph::from_baskets(&baskets);
        let edges = graph.edges();
        let mut seen = BTreeSet::new();
        for edge in &edges {
            prop_assert!(seen.insert((edge.a.clone(), edge.b.clone())));
            prop_assert!(!seen.contains(&(edge.b.clone(), edge.a.clone())));
        }
        prop_assert_eq!(edges.len(), graph.edge_count());
    }

    /// Rankings are ordered by weight descending, then name ascending.
    #[test]
    fn rankings_respect_tie_break(baskets in baskets(), k in 1usize..20) {
        let graph = CooccurrenceGraph::from_baskets(&baskets);
        let engine = QueryEngine::new(&graph);

        let bundles = engine.top_bundles(k);
        prop_assert!(bundles.len() <= k);
        for pair in bundles.windows(2) {
            let (x, y) = (&pair[0], &pair[1]);
            prop_assert!(x.weight > y.weight || (x.weight == y.weight && (&x.a, &x.b) < (&y.a, &y.b)));
        }

        for item in graph.items() {
            let top = engine.top_with_item(item, k);
            for pair in top.windows(2) {
                let ((na, wa), (nb, wb)) = (&pair[0], &pair[1]);
                prop_assert!(wa > wb || (wa == wb && na < nb));
            }
        }
    }

    /// BFS terminates, never reports an item twice, and stays in depth bounds.
    #[test]
    fn bfs_bounded_without_revisits(
        baskets in baskets(),
        max_depth in 0usize..6,
        min_weight in 1u64..4,
    ) {
        let graph = CooccurrenceGraph::from_baskets(&baskets);
        let engine = QueryEngine::new(&graph);

        for start in graph.items() {
            let result = engine.bfs_related(start, max_depth, EdgeWeight::new(min_weight));
            let mut seen = BTreeSet::new();
            for (depth, level) in &result.levels {
                prop_assert!(*depth >= 1 && *depth <= max_depth);
                prop_assert!(!level.is_empty());
                for found in level {
                    prop_assert!(found != start);
                    prop_assert!(seen.insert(found.clone()));
                }
            }
            prop_assert!(seen.len() < graph.item_count());
        }
    }

    /// Folding baskets in any split gives the same graph.
    #[test]
    fn incremental_equals_batch(baskets in baskets(), split in 0usize..30) {
        let split = split.min(baskets.len());
        let batch = CooccurrenceGraph::from_baskets(&baskets);

        let mut incremental = CooccurrenceGraph::from_baskets(&baskets[..split]);
        incremental.update_all(&baskets[split..]);

        prop_assert_eq!(batch, incremental);
    }
}
