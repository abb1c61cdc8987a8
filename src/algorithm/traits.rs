use log::warn;
use serde::Serialize;

use crate::algorithm::dijkstra::Strategy;
use crate::data_structures::OperationCounts;
use crate::graph::{Graph, Weight};
use crate::Result;

/// Per-run metadata exposed to reporting next to the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    pub node_count: usize,
    pub edge_count: usize,
    pub strategy: Strategy,
}

/// Result of a shortest path algorithm execution
///
/// Tables are indexed by node slot. Unreached nodes keep an infinite
/// distance and no predecessor.
#[derive(Debug, Clone)]
pub struct RunResult<W>
where
    W: Weight,
{
    /// Source slot
    pub source: usize,

    /// Distances from source to each node
    pub distances: Vec<W>,

    /// Predecessor of each node in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Nodes in the order they were finalized
    pub finalization_order: Vec<usize>,

    /// Operation counters of the run
    pub counts: OperationCounts,

    pub metadata: RunMetadata,
}

impl<W> RunResult<W>
where
    W: Weight,
{
    /// Finite distance to `node`, `None` if unreachable or out of range
    pub fn distance(&self, node: usize) -> Option<W> {
        self.distances
            .get(node)
            .copied()
            .filter(|distance| distance.is_finite())
    }

    pub fn is_reachable(&self, node: usize) -> bool {
        self.distance(node).is_some()
    }

    /// Number of nodes with a finite distance
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// Shortest path from the source to `target`, see [`reconstruct_path`]
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        reconstruct_path(self, target)
    }
}

/// Walks the predecessor table from `target` back to the source
///
/// Returns the path source-first, or `None` when `target` is unreachable:
/// infinite distance, a chain that ends anywhere but the source, or a
/// chain longer than the graph (a cycle).
pub fn reconstruct_path<W>(result: &RunResult<W>, target: usize) -> Option<Vec<usize>>
where
    W: Weight,
{
    result.distance(target)?;

    let mut path = vec![target];
    let mut current = target;
    while current != result.source {
        current = result.predecessors[current]?;
        path.push(current);

        if path.len() > result.predecessors.len() {
            warn!("Predecessor chain from {} exceeds graph size, likely a cycle", target);
            return None;
        }
    }

    path.reverse();
    Some(path)
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Compute shortest paths from a source slot to all other nodes
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<RunResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Priority structure strategy the algorithm runs with
    fn strategy(&self) -> Strategy;

    /// Get the shortest path from source to target as a sequence of slots
    fn get_path(&self, result: &RunResult<W>, target: usize) -> Option<Vec<usize>> {
        reconstruct_path(result, target)
    }
}
