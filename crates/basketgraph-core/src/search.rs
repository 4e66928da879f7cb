//! # Item Search
//!
//! Resolve loosely typed item names against the graph's item universe.
//!
//! The graph compares items by exact string equality. Callers that take item
//! names from people use this module to find the stored spelling first.

use crate::graph::CooccurrenceStore;
use serde::Serialize;

/// Outcome of resolving a search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "match", content = "items", rename_all = "snake_case")]
pub enum ItemMatch {
    /// The term equals one item, ignoring case.
    Exact(String),
    /// The term is contained in these items, ignoring case (ascending order).
    Candidates(Vec<String>),
    /// Nothing matched.
    NotFound,
}

impl ItemMatch {
    /// The single item this match settles on, if any.
    ///
    /// A candidate list with exactly one entry counts as settled.
    #[must_use]
    pub fn unique(&self) -> Option<&str> {
        match self {
            ItemMatch::Exact(item) => Some(item),
            ItemMatch::Candidates(items) if items.len() == 1 => items.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Resolve `term` against the items of `store`.
///
/// The item spelled exactly like the trimmed term wins. Next comes a
/// case-insensitive match; if several items differ only by case, the first in
/// ascending order is chosen. Otherwise every item containing the term
/// (case-insensitive) is returned as a candidate.
pub fn resolve_item<G: CooccurrenceStore + ?Sized>(store: &G, term: &str) -> ItemMatch {
    let term = term.trim();
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return ItemMatch::NotFound;
    }

    let items = store.items();

    if let Some(exact) = items
        .iter()
        .find(|item| **item == term)
        .or_else(|| items.iter().find(|item| item.to_lowercase() == needle))
    {
        return ItemMatch::Exact((*exact).to_string());
    }

    let candidates: Vec<String> = items
        .iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .map(|item| (*item).to_string())
        .collect();

    if candidates.is_empty() {
        ItemMatch::NotFound
    } else {
        ItemMatch::Candidates(candidates)
    }
}

/// Items containing `filter` (case-insensitive), ascending. An empty filter
/// returns every item.
pub fn filter_items<'g, G: CooccurrenceStore + ?Sized>(store: &'g G, filter: &str) -> Vec<&'g str> {
    let needle = filter.trim().to_lowercase();
    store
        .items()
        .into_iter()
        .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Basket, CooccurrenceGraph};

    fn graph() -> CooccurrenceGraph {
        let baskets = [
            Basket::new(["whole milk", "rolls/buns"]),
            Basket::new(["UHT-milk", "Milk", "butter milk"]),
            Basket::new(["milk", "sugar"]),
        ];
        CooccurrenceGraph::from_baskets(&baskets)
    }

    #[test]
    fn exact_match_ignores_case() {
        let graph = graph();
        assert_eq!(
            resolve_item(&graph, "  ROLLS/BUNS "),
            ItemMatch::Exact("rolls/buns".to_string())
        );
    }

    #[test]
    fn exact_spelling_beats_case_variant() {
        let graph = graph();
        assert_eq!(resolve_item(&graph, "milk"), ItemMatch::Exact("milk".to_string()));
        assert_eq!(resolve_item(&graph, " Milk "), ItemMatch::Exact("Milk".to_string()));
    }

    #[test]
    fn case_variants_pick_first_ascending() {
        let graph = graph();
        // "Milk" < "milk" in byte order.
        assert_eq!(resolve_item(&graph, "MILK"), ItemMatch::Exact("Milk".to_string()));
    }

    #[test]
    fn partial_match_returns_sorted_candidates() {
        let graph = graph();
        assert_eq!(
            resolve_item(&graph, "MIL"),
            ItemMatch::Candidates(vec![
                "Milk".to_string(),
                "UHT-milk".to_string(),
                "butter milk".to_string(),
                "milk".to_string(),
                "whole milk".to_string(),
            ])
        );
    }

    #[test]
    fn no_match_and_empty_term() {
        let graph = graph();
        assert_eq!(resolve_item(&graph, "caviar"), ItemMatch::NotFound);
        assert_eq!(resolve_item(&graph, "   "), ItemMatch::NotFound);
    }

    #[test]
    fn unique_settles_single_candidate() {
        assert_eq!(ItemMatch::Exact("a".to_string()).unique(), Some("a"));
        assert_eq!(ItemMatch::Candidates(vec!["a".to_string()]).unique(), Some("a"));
        assert_eq!(
            ItemMatch::Candidates(vec!["a".to_string(), "b".to_string()]).unique(),
            None
        );
        assert_eq!(ItemMatch::NotFound.unique(), None);
    }

    #[test]
    fn filter_items_case_insensitive() {
        let graph = graph();
        assert_eq!(filter_items(&graph, "BUN"), vec!["rolls/buns"]);
        assert_eq!(filter_items(&graph, "").len(), graph.item_count());
    }
}
