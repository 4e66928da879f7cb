//! # Query Engine
//!
//! Stateless read façade over a `CooccurrenceStore`.
//!
//! The engine borrows the graph and never mutates it. Missing data is never an
//! error here: unknown items yield zero weights and empty rankings.

use crate::graph::{CooccurrenceGraph, CooccurrenceStore};
use crate::query::{Query, QueryOutcome, QueryType};
use crate::{Edge, EdgeWeight, Exploration};
use std::cmp::Reverse;
use std::collections::{BTreeSet, VecDeque};

/// Ranking and traversal queries over a borrowed graph.
#[derive(Debug)]
pub struct QueryEngine<'g, G: CooccurrenceStore + ?Sized = CooccurrenceGraph> {
    store: &'g G,
}

impl<G: CooccurrenceStore + ?Sized> Clone for QueryEngine<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: CooccurrenceStore + ?Sized> Copy for QueryEngine<'_, G> {}

impl<'g, G: CooccurrenceStore + ?Sized> QueryEngine<'g, G> {
    /// Create an engine over `store`.
    #[must_use]
    pub fn new(store: &'g G) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &'g G {
        self.store
    }

    /// Number of baskets in which `a` and `b` appeared together.
    #[must_use]
    pub fn pair_frequency(&self, a: &str, b: &str) -> EdgeWeight {
        self.store.weight(a, b)
    }

    /// Whether `a` and `b` co-occurred at least `threshold` times.
    #[must_use]
    pub fn often_copurchased(&self, a: &str, b: &str, threshold: EdgeWeight) -> bool {
        self.pair_frequency(a, b) >= threshold
    }

    /// The `k` strongest neighbors of `item`.
    ///
    /// Sorted by weight descending, ties broken by neighbor name ascending.
    /// Callers are expected to pass `k >= 1`.
    #[must_use]
    pub fn top_with_item(&self, item: &str, k: usize) -> Vec<(String, EdgeWeight)> {
        let mut neighbors = self.store.neighbors(item);
        neighbors.sort_by(|(na, wa), (nb, wb)| wb.cmp(wa).then_with(|| na.cmp(nb)));
        neighbors
            .into_iter()
            .take(k)
            .map(|(name, weight)| (name.to_string(), weight))
            .collect()
    }

    /// The `k` strongest pairs in the graph.
    ///
    /// Sorted by weight descending, ties broken by `(a, b)` ascending.
    #[must_use]
    pub fn top_bundles(&self, k: usize) -> Vec<Edge> {
        let mut edges = self.store.edges();
        edges.sort_by(|x, y| {
            (Reverse(x.weight), &x.a, &x.b).cmp(&(Reverse(y.weight), &y.a, &y.b))
        });
        edges.truncate(k);
        edges
    }

    /// Breadth-first exploration from `start`.
    ///
    /// Only edges with weight >= `min_weight` are followed, and at most
    /// `max_depth` hops are taken. Each item is reported once, at the depth
    /// where the traversal first reaches it. That is the shortest hop count
    /// over qualifying edges, not the path with the strongest edges.
    #[must_use]
    pub fn bfs_related(&self, start: &str, max_depth: usize, min_weight: EdgeWeight) -> Exploration {
        let mut exploration = Exploration::empty(start);
        if !self.store.contains_item(start) {
            return exploration;
        }

        let mut visited: BTreeSet<&str> = BTreeSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();

        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }

            let next_depth = depth.saturating_add(1);
            for (neighbor, weight) in self.store.neighbors(current) {
                if weight < min_weight || visited.contains(neighbor) {
                    continue;
                }

                visited.insert(neighbor);
                exploration
                    .levels
                    .entry(next_depth)
                    .or_default()
                    .insert(neighbor.to_string());
                queue.push_back((neighbor, next_depth));
            }
        }

        exploration
    }

    /// Execute a structured query.
    ///
    /// Parameters are not validated here; see `Query::validate`.
    #[must_use]
    pub fn execute(&self, query: &Query) -> QueryOutcome {
        match &query.query_type {
            QueryType::PairFrequency { a, b } => QueryOutcome::PairFrequency {
                a: a.clone(),
                b: b.clone(),
                weight: self.pair_frequency(a, b),
            },
            QueryType::OftenCopurchased { a, b, threshold } => {
                let weight = self.pair_frequency(a, b);
                QueryOutcome::OftenCopurchased {
                    a: a.clone(),
                    b: b.clone(),
                    weight,
                    threshold: *threshold,
                    often: weight >= *threshold,
                }
            }
            QueryType::TopWithItem { item, k } => QueryOutcome::TopWithItem {
                item: item.clone(),
                neighbors: self.top_with_item(item, *k),
            },
            QueryType::TopBundles { k } => QueryOutcome::TopBundles {
                bundles: self.top_bundles(*k),
            },
            QueryType::Explore {
                start,
                max_depth,
                min_weight,
            } => QueryOutcome::Explore(self.bfs_related(start, *max_depth, *min_weight)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Basket;

    fn build(baskets: &[(&[&str], usize)]) -> CooccurrenceGraph {
        let mut graph = CooccurrenceGraph::new();
        for (items, times) in baskets {
            let basket = Basket::new(items.iter().copied());
            for _ in 0..*times {
                graph.update(&basket);
            }
        }
        graph
    }

    fn grocery() -> CooccurrenceGraph {
        build(&[
            (&["bread", "milk"], 3),
            (&["bread", "eggs"], 2),
            (&["milk", "eggs"], 1),
            (&["bread", "butter"], 1),
        ])
    }

    fn w(value: u64) -> EdgeWeight {
        EdgeWeight::new(value)
    }

    #[test]
    fn pair_frequency_and_threshold() {
        let graph = grocery();
        let engine = QueryEngine::new(&graph);

        assert_eq!(engine.pair_frequency("bread", "milk"), w(3));
        assert_eq!(engine.pair_frequency("milk", "bread"), w(3));
        assert_eq!(engine.pair_frequency("bread", "caviar"), w(0));
        assert!(engine.often_copurchased("bread", "milk", w(3)));
        assert!(!engine.often_copurchased("bread", "milk", w(4)));
        assert!(!engine.often_copurchased("bread", "caviar", w(1)));
    }

    #[test]
    fn top_with_item_sorted_and_truncated() {
        let graph = grocery();
        let engine = QueryEngine::new(&graph);

        assert_eq!(
            engine.top_with_item("bread", 5),
            vec![
                ("milk".to_string(), w(3)),
                ("eggs".to_string(), w(2)),
                ("butter".to_string(), w(1)),
            ]
        );
        assert_eq!(engine.top_with_item("bread", 1), vec![("milk".to_string(), w(3))]);
        assert!(engine.top_with_item("caviar", 5).is_empty());
    }

    #[test]
    fn top_with_item_tie_break_alphabetical() {
        let graph = build(&[(&["x", "zebra"], 2), (&["x", "apple"], 2), (&["x", "mango"], 2)]);
        let engine = QueryEngine::new(&graph);
        let names: Vec<String> = engine
            .top_with_item("x", 10)
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn top_bundles_ranked() {
        let graph = grocery();
        let engine = QueryEngine::new(&graph);
        let bundles = engine.top_bundles(10);

        assert_eq!(bundles.len(), 4);
        assert_eq!(bundles[0].as_tuple(), ("bread", "milk", 3));
        assert_eq!(bundles[1].as_tuple(), ("bread", "eggs", 2));
        assert_eq!(engine.top_bundles(2).len(), 2);
    }

    #[test]
    fn top_bundles_tie_break() {
        let graph = build(&[(&["apple", "zebra"], 2), (&["apple", "yankee"], 2)]);
        let engine = QueryEngine::new(&graph);
        let tuples: Vec<(String, String, u64)> = engine
            .top_bundles(10)
            .into_iter()
            .map(|e| (e.a, e.b, e.weight.value()))
            .collect();
        assert_eq!(
            tuples,
            vec![
                ("apple".to_string(), "yankee".to_string(), 2),
                ("apple".to_string(), "zebra".to_string(), 2),
            ]
        );
    }

    #[test]
    fn bfs_depth_one_returns_direct_neighbors() {
        let graph = build(&[(&["a", "b"], 1), (&["b", "c"], 1)]);
        let engine = QueryEngine::new(&graph);
        let result = engine.bfs_related("a", 1, w(1));

        assert_eq!(result.levels.len(), 1);
        assert_eq!(result.at_depth(1), Some(&BTreeSet::from(["b".to_string()])));
    }

    #[test]
    fn bfs_depth_two_reaches_multi_hop() {
        let graph = build(&[(&["a", "b"], 1), (&["b", "c"], 1), (&["c", "d"], 1)]);
        let engine = QueryEngine::new(&graph);
        let result = engine.bfs_related("a", 2, w(1));

        assert_eq!(result.at_depth(1), Some(&BTreeSet::from(["b".to_string()])));
        assert_eq!(result.at_depth(2), Some(&BTreeSet::from(["c".to_string()])));
        assert_eq!(result.at_depth(3), None);
    }

    #[test]
    fn bfs_min_weight_filters_edges() {
        let graph = build(&[(&["a", "b"], 5), (&["a", "c"], 1), (&["b", "c"], 5)]);
        let engine = QueryEngine::new(&graph);
        let result = engine.bfs_related("a", 2, w(2));

        // c is skipped at depth 1 (weak edge) and reached through b instead.
        assert_eq!(result.at_depth(1), Some(&BTreeSet::from(["b".to_string()])));
        assert_eq!(result.at_depth(2), Some(&BTreeSet::from(["c".to_string()])));
    }

    #[test]
    fn bfs_first_discovery_wins_over_stronger_path() {
        // c is one weak hop away and two strong hops away; shallowest wins.
        let graph = build(&[(&["a", "c"], 1), (&["a", "b"], 9), (&["b", "c"], 9)]);
        let engine = QueryEngine::new(&graph);
        let result = engine.bfs_related("a", 3, w(1));

        assert_eq!(
            result.at_depth(1),
            Some(&BTreeSet::from(["b".to_string(), "c".to_string()]))
        );
        assert_eq!(result.at_depth(2), None);
    }

    #[test]
    fn bfs_cycle_terminates_without_revisits() {
        let graph = build(&[(&["a", "b", "c", "d"], 3)]);
        let engine = QueryEngine::new(&graph);
        let result = engine.bfs_related("a", 50, w(1));

        assert_eq!(result.discovered(), 3);
        assert!(result.levels.values().all(|level| !level.contains("a")));
    }

    #[test]
    fn bfs_unknown_start_returns_empty_levels() {
        let graph = grocery();
        let engine = QueryEngine::new(&graph);
        let result = engine.bfs_related("caviar", 2, w(1));
        assert_eq!(result, Exploration::empty("caviar"));
    }

    #[test]
    fn bfs_zero_depth_returns_empty_levels() {
        let graph = grocery();
        let engine = QueryEngine::new(&graph);
        assert!(engine.bfs_related("bread", 0, w(1)).is_empty());
    }

    #[test]
    fn execute_dispatches() {
        let graph = grocery();
        let engine = QueryEngine::new(&graph);

        assert_eq!(
            engine.execute(&Query::often_copurchased("bread", "eggs", 2)),
            QueryOutcome::OftenCopurchased {
                a: "bread".to_string(),
                b: "eggs".to_string(),
                weight: w(2),
                threshold: w(2),
                often: true,
            }
        );
        assert!(matches!(
            engine.execute(&Query::top_bundles(1)),
            QueryOutcome::TopBundles { ref bundles } if bundles.len() == 1
        ));
        assert!(matches!(
            engine.execute(&Query::explore("bread", 1, 1)),
            QueryOutcome::Explore(ref e) if e.discovered() == 3
        ));
    }
}
