//! # Presenter
//!
//! Plain-text rendering of query results.
//!
//! Every function returns a `String` so commands can print, log or test it.

use basketgraph_core::{
    Edge, EdgeWeight, Exploration, GraphMetrics, ItemDegree, QueryOutcome, WeightBucket,
};
use serde::Serialize;

const WIDTH: usize = 60;

fn rule(ch: char) -> String {
    ch.to_string().repeat(WIDTH)
}

/// Render a fixed-point value with `scale` digits after the point.
fn fixed_point(value: u64, scale: u32) -> String {
    let divisor = 10u64.pow(scale);
    format!(
        "{}.{:0width$}",
        value / divisor,
        value % divisor,
        width = scale as usize
    )
}

// =============================================================================
// QUERY RESULTS
// =============================================================================

/// Render any query outcome.
pub fn format_outcome(outcome: &QueryOutcome) -> String {
    match outcome {
        QueryOutcome::PairFrequency { a, b, weight } => format_pair(a, b, *weight),
        QueryOutcome::OftenCopurchased {
            a,
            b,
            weight,
            threshold,
            often,
        } => format!(
            "{}\nOften co-purchased (at least {} times): {}",
            format_pair(a, b, *weight),
            threshold,
            if *often { "yes" } else { "no" }
        ),
        QueryOutcome::TopWithItem { item, neighbors } => format_recommendations(item, neighbors),
        QueryOutcome::TopBundles { bundles } => format_top_bundles(bundles),
        QueryOutcome::Explore(exploration) => format_exploration(exploration),
    }
}

/// Ranked table of item pairs.
pub fn format_top_bundles(bundles: &[Edge]) -> String {
    if bundles.is_empty() {
        return "No bundles found.".to_string();
    }

    let mut lines = vec![
        rule('='),
        "TOP PRODUCT BUNDLES (Item Pairs)".to_string(),
        rule('='),
        format!("{:<6} {:<20} {:<20} {:<8}", "Rank", "Item 1", "Item 2", "Frequency"),
        rule('-'),
    ];
    for (rank, edge) in bundles.iter().enumerate() {
        lines.push(format!(
            "{:<6} {:<20} {:<20} {:<8}",
            rank + 1,
            edge.a,
            edge.b,
            edge.weight.value()
        ));
    }
    lines.push(rule('='));
    lines.join("\n")
}

/// Ranked table of the items bought with `item`.
pub fn format_recommendations(item: &str, neighbors: &[(String, EdgeWeight)]) -> String {
    if neighbors.is_empty() {
        return format!("No items found to recommend with '{item}'.");
    }

    let mut lines = vec![
        rule('='),
        format!("TOP ITEMS BOUGHT WITH: {}", item.to_uppercase()),
        rule('='),
        format!("{:<6} {:<30} {:<8}", "Rank", "Item", "Co-Purchases"),
        rule('-'),
    ];
    for (rank, (name, weight)) in neighbors.iter().enumerate() {
        lines.push(format!("{:<6} {:<30} {:<8}", rank + 1, name, weight.value()));
    }
    lines.push(rule('='));
    lines.join("\n")
}

/// One pair and its co-purchase count.
pub fn format_pair(a: &str, b: &str, weight: EdgeWeight) -> String {
    if weight == EdgeWeight::ZERO {
        format!("'{a}' and '{b}' were never purchased together")
    } else {
        format!("{a} + {b}: {weight} co-purchases")
    }
}

/// Items reached from the start item, one line per hop distance.
pub fn format_exploration(exploration: &Exploration) -> String {
    if exploration.is_empty() {
        return format!("No related items found for '{}'.", exploration.start);
    }

    let mut lines = vec![format!(
        "Items related to '{}' ({} found):",
        exploration.start,
        exploration.discovered()
    )];
    for (depth, items) in &exploration.levels {
        let names: Vec<&str> = items.iter().map(String::as_str).collect();
        lines.push(format!("  Degree {}: {}", depth, names.join(", ")));
    }
    lines.join("\n")
}

// =============================================================================
// ITEM LIST
// =============================================================================

/// Items matching an optional filter.
#[derive(Debug, Serialize)]
pub struct ItemList<'a> {
    pub filter: Option<&'a str>,
    pub count: usize,
    pub items: Vec<&'a str>,
}

pub fn format_items(list: &ItemList<'_>) -> String {
    if list.items.is_empty() {
        return match list.filter {
            Some(filter) => format!("No items match '{filter}'."),
            None => "No items in dataset.".to_string(),
        };
    }

    let mut lines = vec![format!("Available items ({} total):", list.count)];
    for (i, item) in list.items.iter().enumerate() {
        lines.push(format!("  {:>3}. {}", i + 1, item));
    }
    lines.join("\n")
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Everything `stats` reports.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub baskets: usize,
    pub metrics: GraphMetrics,
    pub top_items: Vec<ItemDegree>,
    pub weight_histogram: Vec<WeightBucket>,
    /// Component sizes, largest first.
    pub component_sizes: Vec<usize>,
}

pub fn format_stats(report: &StatsReport) -> String {
    let m = &report.metrics;
    let largest = report.component_sizes.first().copied().unwrap_or(0);

    let mut lines = vec![
        rule('='),
        "GRAPH STATISTICS".to_string(),
        rule('='),
        format!("Baskets:            {}", report.baskets),
        format!("Items:              {}", m.item_count),
        format!("Item pairs:         {}", m.edge_count),
        format!("Total co-purchases: {}", m.total_weight),
        format!("Weight range:       {} - {}", m.min_weight, m.max_weight),
        format!("Density:            {}", fixed_point(m.density_millionths, 6)),
        format!("Average partners:   {}", fixed_point(m.average_degree_millis, 3)),
        format!(
            "Components:         {} (largest: {} items)",
            report.component_sizes.len(),
            largest
        ),
    ];

    if !report.top_items.is_empty() {
        lines.push(rule('-'));
        lines.push("MOST CONNECTED ITEMS".to_string());
        lines.push(format!(
            "{:<6} {:<30} {:<9} {:<8}",
            "Rank", "Item", "Partners", "Co-Purchases"
        ));
        for (rank, entry) in report.top_items.iter().enumerate() {
            lines.push(format!(
                "{:<6} {:<30} {:<9} {:<8}",
                rank + 1,
                entry.item,
                entry.degree,
                entry.total_weight
            ));
        }
    }

    lines.push(rule('-'));
    lines.push("WEIGHT DISTRIBUTION".to_string());
    lines.push(format!("{:<12} {:<8}", "Weight", "Pairs"));
    for bucket in &report.weight_histogram {
        lines.push(format!("{:<12} {:<8}", bucket.to_string(), bucket.count));
    }
    lines.push(rule('='));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn empty_results_have_messages() {
        assert_eq!(format_top_bundles(&[]), "No bundles found.");
        assert_eq!(
            format_recommendations("bread", &[]),
            "No items found to recommend with 'bread'."
        );
        assert_eq!(
            format_exploration(&Exploration::empty("bread")),
            "No related items found for 'bread'."
        );
    }

    #[test]
    fn bundle_table_rows() {
        let out = format_top_bundles(&[Edge::canonical("milk", "bread", EdgeWeight::new(3))]);
        assert!(out.contains("TOP PRODUCT BUNDLES"));
        assert!(out.lines().any(|l| l.starts_with("1      bread") && l.contains("milk") && l.trim_end().ends_with('3')));
    }

    #[test]
    fn pair_lines() {
        assert_eq!(
            format_pair("bread", "milk", EdgeWeight::new(3)),
            "bread + milk: 3 co-purchases"
        );
        assert!(format_pair("bread", "caviar", EdgeWeight::ZERO).contains("never"));
    }

    #[test]
    fn exploration_lists_degrees() {
        let exploration = Exploration {
            start: "a".to_string(),
            levels: BTreeMap::from([
                (1, BTreeSet::from(["c".to_string(), "b".to_string()])),
                (2, BTreeSet::from(["d".to_string()])),
            ]),
        };
        let out = format_exploration(&exploration);
        assert!(out.contains("(3 found)"));
        assert!(out.contains("  Degree 1: b, c"));
        assert!(out.contains("  Degree 2: d"));
    }

    #[test]
    fn fixed_point_rendering() {
        assert_eq!(fixed_point(666_666, 6), "0.666666");
        assert_eq!(fixed_point(2_000, 3), "2.000");
        assert_eq!(fixed_point(1_050, 3), "1.050");
    }
}
