use std::fmt;

use log::debug;
use serde::Serialize;

use crate::algorithm::{RunMetadata, RunResult};
use crate::data_structures::{FrontierView, OperationCounter, OperationCounts, PriorityStructure};
use crate::graph::{Graph, Weight};
use crate::{Error, Result};

/// Lifecycle of one engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    /// Source validated, tables not built yet
    Init,
    /// Main loop in progress
    Running,
    /// Priority structure exhausted; tables and counters are final
    Done,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::Init => "initializing",
            EngineState::Running => "running",
            EngineState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Dijkstra's algorithm as an explicit `Init -> Running -> Done` state
/// machine, parameterized by the priority structure `Q`
///
/// The engine borrows the graph immutably and owns every piece of per-run
/// state, so several engines may run over one graph concurrently.
#[derive(Debug)]
pub struct DijkstraEngine<'g, W, G, Q>
where
    W: Weight,
    G: Graph<W>,
    Q: PriorityStructure<W>,
{
    graph: &'g G,
    source: usize,
    state: EngineState,
    queue: Q,
    distances: Vec<W>,
    predecessors: Vec<Option<usize>>,
    finalized: Vec<bool>,
    finalization_order: Vec<usize>,
    ranks: Vec<usize>,
    ops: OperationCounter,
}

impl<'g, W, G, Q> DijkstraEngine<'g, W, G, Q>
where
    W: Weight,
    G: Graph<W>,
    Q: PriorityStructure<W>,
{
    /// Creates an engine in the `Init` state
    ///
    /// Fails with `UnknownNode` if `source` is not a slot of `graph`.
    pub fn new(graph: &'g G, source: usize) -> Result<Self> {
        if !graph.has_node(source) {
            return Err(Error::UnknownNode(format!("slot {}", source)));
        }

        Ok(DijkstraEngine {
            graph,
            source,
            state: EngineState::Init,
            queue: Q::new(0),
            distances: Vec::new(),
            predecessors: Vec::new(),
            finalized: Vec::new(),
            finalization_order: Vec::new(),
            ranks: Vec::new(),
            ops: OperationCounter::new(),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// Current distance table (empty before the first step)
    pub fn distances(&self) -> &[W] {
        &self.distances
    }

    /// Current predecessor table (empty before the first step)
    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    /// Counters accumulated so far
    pub fn counts(&self) -> OperationCounts {
        self.ops.snapshot()
    }

    fn initialize(&mut self) {
        let n = self.graph.node_count();
        self.distances = vec![W::infinity(); n];
        self.predecessors = vec![None; n];
        self.finalized = vec![false; n];
        self.finalization_order = Vec::with_capacity(n);
        self.ranks = self.graph.tie_break_ranks();
        self.queue = Q::new(n);
        self.ops.reset();

        self.distances[self.source] = W::zero();
        self.queue.decrease_key_or_insert(
            self.source,
            W::zero(),
            &FrontierView {
                finalized: &self.finalized,
                ranks: &self.ranks,
            },
            &mut self.ops,
        );

        debug!(
            "{} Dijkstra from slot {} over {} nodes and {} edges",
            Q::STRATEGY,
            self.source,
            n,
            self.graph.edge_count()
        );
        self.state = EngineState::Running;
    }

    /// Advances the run until one more node is finalized
    ///
    /// Returns the finalized slot, or `None` when the priority structure is
    /// exhausted and the engine has moved to `Done`. Stale candidates are
    /// discarded inside the call and never reported as progress.
    pub fn step(&mut self) -> Result<Option<usize>> {
        match self.state {
            EngineState::Done => {
                return Err(Error::InvalidState {
                    operation: "step",
                    state: self.state,
                })
            }
            EngineState::Init => self.initialize(),
            EngineState::Running => {}
        }

        loop {
            if self.queue.is_empty() {
                return Ok(self.finish());
            }

            let extracted = self.queue.extract_min(
                &FrontierView {
                    finalized: &self.finalized,
                    ranks: &self.ranks,
                },
                &mut self.ops,
            );
            let Some((u, _)) = extracted else {
                return Ok(self.finish());
            };
            if self.finalized[u] {
                continue;
            }

            self.finalize(u);
            return Ok(Some(u));
        }
    }

    fn finalize(&mut self, u: usize) {
        self.finalized[u] = true;
        self.finalization_order.push(u);
        let base = self.distances[u];
        debug!("Finalized slot {} at distance {:?}", u, base);

        let graph = self.graph;
        for edge in graph.out_edges(u) {
            self.ops.record_relaxation_attempt();
            let v = edge.to;
            if self.finalized[v] {
                continue;
            }

            let candidate = base + edge.weight;
            if candidate < self.distances[v] {
                self.distances[v] = candidate;
                self.predecessors[v] = Some(u);
                self.queue.decrease_key_or_insert(
                    v,
                    candidate,
                    &FrontierView {
                        finalized: &self.finalized,
                        ranks: &self.ranks,
                    },
                    &mut self.ops,
                );
                self.ops.record_relaxation_success();
            }
        }
    }

    fn finish(&mut self) -> Option<usize> {
        debug!(
            "{} Dijkstra finished: {} of {} nodes finalized, {:?}",
            Q::STRATEGY,
            self.finalization_order.len(),
            self.distances.len(),
            self.ops.snapshot()
        );
        self.state = EngineState::Done;
        None
    }

    /// Runs the main loop to completion
    pub fn run(&mut self) -> Result<()> {
        if self.state == EngineState::Done {
            return Err(Error::InvalidState {
                operation: "run",
                state: self.state,
            });
        }
        while self.step()?.is_some() {}
        Ok(())
    }

    /// Snapshot of the finished run; only available in `Done`
    pub fn result(&self) -> Result<RunResult<W>> {
        if self.state != EngineState::Done {
            return Err(Error::InvalidState {
                operation: "read the result",
                state: self.state,
            });
        }

        Ok(RunResult {
            source: self.source,
            distances: self.distances.clone(),
            predecessors: self.predecessors.clone(),
            finalization_order: self.finalization_order.clone(),
            counts: self.ops.snapshot(),
            metadata: RunMetadata {
                node_count: self.graph.node_count(),
                edge_count: self.graph.edge_count(),
                strategy: Q::STRATEGY,
            },
        })
    }
}
