use log::warn;
use serde::{Deserialize, Serialize};

use crate::algorithm::dijkstra::Strategy;
use crate::data_structures::OperationCounts;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Operation counts of both strategies on one graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Graph identity, usually the file name
    pub graph: String,
    /// Number of nodes
    pub n: usize,
    /// Number of edges
    pub m: usize,
    /// Total operations of the linear-scan run
    pub naive_ops: u64,
    /// Total operations of the binary-heap run
    pub heap_ops: u64,
    pub naive: OperationCounts,
    pub heap: OperationCounts,
}

/// Runs both strategies from `source` and records their counters
///
/// Both runs must agree on every distance; a disagreement is logged since
/// it would invalidate the comparison.
pub fn measure_graph<W, G>(name: &str, graph: &G, source: usize) -> Result<RunRecord>
where
    W: Weight,
    G: Graph<W>,
{
    let naive = Strategy::Naive.run::<W, G>(graph, source)?;
    let heap = Strategy::Heap.run::<W, G>(graph, source)?;

    if naive.distances != heap.distances {
        warn!("Strategies disagree on distances for graph '{}'", name);
    }

    Ok(RunRecord {
        graph: name.to_string(),
        n: graph.node_count(),
        m: graph.edge_count(),
        naive_ops: naive.counts.total(),
        heap_ops: heap.counts.total(),
        naive: naive.counts,
        heap: heap.counts,
    })
}
