use crate::graph::traits::{Edge, Graph, NodeKey, Weight};
use crate::{Error, Result};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A directed graph implementation using adjacency lists
///
/// Nodes are registered under a caller-chosen id and receive a dense slot
/// in insertion order. Parallel edges and self-loops are kept as inserted.
#[derive(Debug, Clone)]
pub struct DirectedGraph<N, W>
where
    N: NodeKey,
    W: Weight,
{
    /// Node ids by slot
    nodes: Vec<N>,

    /// id -> slot
    index: HashMap<N, usize>,

    /// Outgoing edges for each slot, in insertion order
    adjacency: Vec<Vec<Edge<W>>>,

    /// Total number of edges across all adjacency lists
    edge_count: usize,
}

impl<N, W> Default for DirectedGraph<N, W>
where
    N: NodeKey,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, W> DirectedGraph<N, W>
where
    N: NodeKey,
    W: Weight,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty graph with room for `nodes` nodes
    pub fn with_capacity(nodes: usize) -> Self {
        DirectedGraph {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Registers a node and returns its slot
    ///
    /// Registering an id twice is an error rather than a no-op, so loaders
    /// notice duplicated input lines.
    pub fn add_node(&mut self, id: N) -> Result<usize> {
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateNode(format!("{:?}", id)));
        }
        let slot = self.nodes.len();
        self.index.insert(id.clone(), slot);
        self.nodes.push(id);
        self.adjacency.push(Vec::new());
        Ok(slot)
    }

    /// Adds a directed edge between two registered nodes
    ///
    /// Fails without modifying the graph if the weight is negative (or NaN)
    /// or if either endpoint is unknown.
    pub fn add_edge<Q>(&mut self, from: &Q, to: &Q, weight: W) -> Result<()>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        check_weight(from, to, weight)?;
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.push_edge(from, to, weight);
        Ok(())
    }

    /// Adds an edge in both directions (undirected-as-directed)
    pub fn add_undirected_edge<Q>(&mut self, a: &Q, b: &Q, weight: W) -> Result<()>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        check_weight(a, b, weight)?;
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        self.push_edge(a, b, weight);
        self.push_edge(b, a, weight);
        Ok(())
    }

    /// Adds a directed edge between two slots
    pub fn add_edge_by_slot(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        check_weight(&from, &to, weight)?;
        for slot in [from, to] {
            if slot >= self.nodes.len() {
                return Err(Error::UnknownNode(format!("slot {}", slot)));
            }
        }
        self.push_edge(from, to, weight);
        Ok(())
    }

    fn push_edge(&mut self, from: usize, to: usize, weight: W) {
        self.adjacency[from].push(Edge { to, weight });
        self.edge_count += 1;
    }

    /// Returns the slot of a node id
    pub fn index_of<Q>(&self, id: &Q) -> Result<usize>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode(format!("{:?}", id)))
    }

    /// Returns true if the id is registered
    pub fn contains_node<Q>(&self, id: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(id)
    }

    /// Returns the id stored at a slot
    pub fn node_id(&self, slot: usize) -> Option<&N> {
        self.nodes.get(slot)
    }

    /// All node ids in slot order
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Outgoing `(target, weight)` pairs of a node, in insertion order
    pub fn neighbors<Q>(&self, id: &Q) -> Result<impl Iterator<Item = (&N, W)> + '_>
    where
        N: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let slot = self.index_of(id)?;
        Ok(self.adjacency[slot]
            .iter()
            .map(move |edge| (&self.nodes[edge.to], edge.weight)))
    }

    /// Every edge as `(from slot, edge)`, grouped by source slot
    pub fn edges(&self) -> impl Iterator<Item = (usize, Edge<W>)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |edge| (from, *edge)))
    }

    /// Builds a copy of this graph with every id mapped through `f`
    ///
    /// Slots and edges are preserved. Fails if `f` maps two ids to the same
    /// new id.
    pub fn relabel<M, F>(&self, mut f: F) -> Result<DirectedGraph<M, W>>
    where
        M: NodeKey,
        F: FnMut(&N) -> M,
    {
        let mut graph = DirectedGraph::with_capacity(self.nodes.len());
        for id in &self.nodes {
            graph.add_node(f(id))?;
        }
        graph.adjacency = self.adjacency.clone();
        graph.edge_count = self.edge_count;
        Ok(graph)
    }

    /// Adjacency matrix of the graph, `None` where no edge exists
    ///
    /// Row = tail slot, column = head slot. Parallel edges collapse to the
    /// lightest one.
    pub fn to_matrix(&self) -> Vec<Vec<Option<f64>>> {
        let n = self.nodes.len();
        let mut matrix = vec![vec![None; n]; n];
        for (from, edge) in self.edges() {
            let weight = edge.weight.to_f64().unwrap_or(f64::INFINITY);
            let cell = &mut matrix[from][edge.to];
            *cell = Some(cell.map_or(weight, |existing: f64| existing.min(weight)));
        }
        matrix
    }
}

impl<W> DirectedGraph<usize, W>
where
    W: Weight,
{
    /// Creates a graph with nodes `0..count`, where each id equals its slot
    pub fn with_nodes(count: usize) -> Self {
        let mut graph = DirectedGraph::with_capacity(count);
        for id in 0..count {
            graph.index.insert(id, id);
            graph.nodes.push(id);
            graph.adjacency.push(Vec::new());
        }
        graph
    }

    /// Builds a graph from a square adjacency matrix (`None` = no edge)
    pub fn from_matrix(matrix: &[Vec<Option<f64>>]) -> Result<Self> {
        let n = matrix.len();
        if let Some((row, cells)) = matrix.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(Error::InvalidMatrix(format!(
                "matrix must be square: row {} has {} entries, expected {}",
                row,
                cells.len(),
                n
            )));
        }

        let mut graph = DirectedGraph::with_nodes(n);
        for (from, row) in matrix.iter().enumerate() {
            for (to, cell) in row.iter().enumerate() {
                if let Some(value) = cell {
                    let weight: W = num_traits::cast(*value).ok_or_else(|| {
                        Error::InvalidMatrix(format!("weight {} is not representable", value))
                    })?;
                    graph.add_edge_by_slot(from, to, weight)?;
                }
            }
        }
        Ok(graph)
    }
}

impl<N, W> Graph<W> for DirectedGraph<N, W>
where
    N: NodeKey,
    W: Weight,
{
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn out_edges(&self, node: usize) -> &[Edge<W>] {
        self.adjacency.get(node).map_or(&[], |edges| edges.as_slice())
    }

    fn tie_break_ranks(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.nodes.len()).collect();
        order.sort_by(|&a, &b| self.nodes[a].cmp(&self.nodes[b]));

        let mut ranks = vec![0; order.len()];
        for (rank, slot) in order.into_iter().enumerate() {
            ranks[slot] = rank;
        }
        ranks
    }
}

fn check_weight<Q, W>(from: &Q, to: &Q, weight: W) -> Result<()>
where
    Q: Debug + ?Sized,
    W: Weight,
{
    if weight.is_nan() || weight < W::zero() {
        return Err(Error::InvalidWeight {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
            weight: weight.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}
