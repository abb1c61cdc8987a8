use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::engine::DijkstraEngine;
use crate::algorithm::{RunResult, ShortestPathAlgorithm};
use crate::data_structures::{LazyBinaryHeap, LinearScanQueue, PriorityStructure};
use crate::graph::{DirectedGraph, Graph, NodeKey, Weight};
use crate::{Error, Result};

/// Which priority structure a Dijkstra run selects its next node with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Linear scan over the distance array, O(V²)
    Naive,
    /// Binary min-heap with lazy decrease-key, O((V + E) log V)
    Heap,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Naive, Strategy::Heap];

    /// Runs Dijkstra from `source` with this strategy
    pub fn run<W, G>(self, graph: &G, source: usize) -> Result<RunResult<W>>
    where
        W: Weight,
        G: Graph<W>,
    {
        match self {
            Strategy::Naive => run_engine::<W, G, LinearScanQueue<W>>(graph, source),
            Strategy::Heap => run_engine::<W, G, LazyBinaryHeap<W>>(graph, source),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Naive => f.write_str("naive"),
            Strategy::Heap => f.write_str("heap"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" | "simple" | "scan" => Ok(Strategy::Naive),
            "heap" | "binary-heap" => Ok(Strategy::Heap),
            other => Err(Error::Config(format!("Unknown strategy: {}", other))),
        }
    }
}

fn run_engine<W, G, Q>(graph: &G, source: usize) -> Result<RunResult<W>>
where
    W: Weight,
    G: Graph<W>,
    Q: PriorityStructure<W>,
{
    let mut engine = DijkstraEngine::<W, G, Q>::new(graph, source)?;
    engine.run()?;
    engine.result()
}

/// Dijkstra's algorithm with a linear-scan priority structure
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveDijkstra;

impl NaiveDijkstra {
    /// Creates a new naive Dijkstra instance
    pub fn new() -> Self {
        NaiveDijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for NaiveDijkstra
where
    W: Weight,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra (linear scan)"
    }

    fn strategy(&self) -> Strategy {
        Strategy::Naive
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<RunResult<W>> {
        run_engine::<W, G, LinearScanQueue<W>>(graph, source)
    }
}

/// Classic Dijkstra's algorithm on a binary heap with lazy decrease-key
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapDijkstra;

impl HeapDijkstra {
    /// Creates a new heap Dijkstra instance
    pub fn new() -> Self {
        HeapDijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for HeapDijkstra
where
    W: Weight,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra (binary heap)"
    }

    fn strategy(&self) -> Strategy {
        Strategy::Heap
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<RunResult<W>> {
        run_engine::<W, G, LazyBinaryHeap<W>>(graph, source)
    }
}

/// Runs `strategy` from the node with id `source`
pub fn shortest_paths_from<N, W, Q>(
    graph: &DirectedGraph<N, W>,
    source: &Q,
    strategy: Strategy,
) -> Result<RunResult<W>>
where
    N: NodeKey + Borrow<Q>,
    W: Weight,
    Q: Hash + Eq + fmt::Debug + ?Sized,
{
    let slot = graph.index_of(source)?;
    strategy.run(graph, slot)
}
