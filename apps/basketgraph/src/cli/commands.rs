//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Each `cmd_*` function returns the rendered output instead of printing it,
//! in text or JSON depending on `json_mode`.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::presenter::{self, ItemList, StatsReport};
use basketgraph_core::{
    CooccurrenceStore, GraphMetrics, ItemMatch, Query, Session, connected_components,
    degree_ranking, filter_items, resolve_item, weight_histogram,
};
use serde::Serialize;
use std::path::Path;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// SESSION LOADING
// =============================================================================

/// Load the dataset named by `data` or the config into a new session.
pub fn load_session(config: &Config, data: Option<&Path>) -> Result<Session> {
    let path = config.dataset_path(data)?;
    let schema = config.schema()?;

    tracing::info!("Loading transactions from {}", path.display());
    let session = Session::load(&path, schema)?;

    let graph = session.graph();
    tracing::info!(
        records = session.record_count(),
        baskets = session.basket_count(),
        items = graph.item_count(),
        pairs = graph.edge_count(),
        "Built co-occurrence graph"
    );

    Ok(session)
}

/// Turn a user-typed item name into the stored item.
///
/// Exact (case-insensitive) matches and single partial matches resolve
/// directly; several partial matches are reported back, never guessed.
pub fn resolve(session: &Session, term: &str) -> Result<String> {
    let found = resolve_item(session.graph(), term);
    if let Some(item) = found.unique() {
        if !item.eq_ignore_ascii_case(term.trim()) {
            tracing::debug!("Resolved '{}' to '{}'", term, item);
        }
        return Ok(item.to_string());
    }

    match found {
        ItemMatch::Candidates(candidates) => {
            tracing::warn!("'{}' is ambiguous ({} matches)", term, candidates.len());
            Err(CliError::AmbiguousItem {
                term: term.to_string(),
                candidates,
            })
        }
        ItemMatch::Exact(_) | ItemMatch::NotFound => {
            tracing::warn!("Item not found: {}", term);
            Err(CliError::ItemNotFound(term.to_string()))
        }
    }
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// Run a validated query and render its outcome.
fn run_query(session: &Session, json_mode: bool, query: &Query) -> Result<String> {
    query.validate()?;
    tracing::debug!("Executing {:?}", query.query_type);

    let outcome = session.engine().execute(query);
    if json_mode {
        to_json(&outcome)
    } else {
        Ok(presenter::format_outcome(&outcome))
    }
}

/// Top `k` items bought with `term`.
pub fn cmd_with(session: &Session, json_mode: bool, term: &str, k: usize) -> Result<String> {
    let item = resolve(session, term)?;
    run_query(session, json_mode, &Query::top_with_item(item, k))
}

/// Top `k` pairs overall.
pub fn cmd_bundles(session: &Session, json_mode: bool, k: usize) -> Result<String> {
    run_query(session, json_mode, &Query::top_bundles(k))
}

/// Co-purchase count of two items, optionally checked against `threshold`.
pub fn cmd_pair(
    session: &Session,
    json_mode: bool,
    a: &str,
    b: &str,
    threshold: Option<u64>,
) -> Result<String> {
    let a = resolve(session, a)?;
    let b = resolve(session, b)?;

    let query = match threshold {
        Some(threshold) => Query::often_copurchased(a, b, threshold),
        None => Query::pair_frequency(a, b),
    };
    run_query(session, json_mode, &query)
}

/// Breadth-first exploration from `term`.
pub fn cmd_explore(
    session: &Session,
    json_mode: bool,
    term: &str,
    max_depth: usize,
    min_weight: u64,
) -> Result<String> {
    let item = resolve(session, term)?;
    run_query(
        session,
        json_mode,
        &Query::explore(item, max_depth, min_weight),
    )
}

// =============================================================================
// ITEMS COMMAND
// =============================================================================

/// List items, optionally filtered by a substring.
pub fn cmd_items(session: &Session, json_mode: bool, filter: Option<&str>) -> Result<String> {
    let items = filter_items(session.graph(), filter.unwrap_or(""));
    let list = ItemList {
        filter,
        count: items.len(),
        items,
    };

    if json_mode {
        to_json(&list)
    } else {
        Ok(presenter::format_items(&list))
    }
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Graph statistics with the `top` most connected items.
pub fn cmd_stats(session: &Session, json_mode: bool, top: usize) -> Result<String> {
    let graph = session.graph();
    let report = StatsReport {
        baskets: session.basket_count(),
        metrics: GraphMetrics::from_store(graph),
        top_items: degree_ranking(graph, top),
        weight_histogram: weight_histogram(graph),
        component_sizes: connected_components(graph)
            .iter()
            .map(|component| component.len())
            .collect(),
    };

    if json_mode {
        to_json(&report)
    } else {
        Ok(presenter::format_stats(&report))
    }
}
