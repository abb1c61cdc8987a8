//! Console summaries of graphs and runs.

use std::fmt::{Display, Write};

use crate::algorithm::RunResult;
use crate::data_structures::OperationCounts;
use crate::graph::{DirectedGraph, Graph, NodeKey, Weight};

fn weight_text<W: Weight>(weight: W) -> String {
    match weight.to_f64() {
        Some(value) if value.is_infinite() => "inf".to_string(),
        Some(value) => format!("{}", value),
        None => format!("{:?}", weight),
    }
}

/// One line per node: `A [0] -> B (1), C (3)`
///
/// The bracketed value is the node's distance in `result`, when given.
pub fn adjacency_summary<N, W>(graph: &DirectedGraph<N, W>, result: Option<&RunResult<W>>) -> String
where
    N: NodeKey + Display,
    W: Weight,
{
    let mut out = String::new();
    for (slot, id) in graph.nodes().iter().enumerate() {
        let neighbors = graph
            .out_edges(slot)
            .iter()
            .map(|edge| format!("{} ({})", graph.nodes()[edge.to], weight_text(edge.weight)))
            .collect::<Vec<_>>()
            .join(", ");
        match result.and_then(|r| r.distances.get(slot)) {
            Some(distance) => {
                let _ = writeln!(out, "{} [{}] -> {}", id, weight_text(*distance), neighbors);
            }
            None => {
                let _ = writeln!(out, "{} -> {}", id, neighbors);
            }
        }
    }
    out
}

/// One line per node with its distance, `inf` when unreachable
pub fn distance_summary<N, W>(graph: &DirectedGraph<N, W>, result: &RunResult<W>) -> String
where
    N: NodeKey + Display,
    W: Weight,
{
    let mut out = String::new();
    for (slot, id) in graph.nodes().iter().enumerate() {
        let distance = result.distances.get(slot).copied().unwrap_or_else(W::infinity);
        let _ = writeln!(out, "Node [{}]: {}", id, weight_text(distance));
    }
    out
}

/// Multi-line rendering of one run's counters
pub fn counts_summary(label: &str, counts: &OperationCounts) -> String {
    format!(
        "{} operations: {}\n  comparisons: {}\n  extractions: {}\n  relaxation attempts: {}\n  relaxation successes: {}\n",
        label,
        counts.total(),
        counts.comparisons,
        counts.extractions,
        counts.relaxation_attempts,
        counts.relaxation_successes
    )
}
