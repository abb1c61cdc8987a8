use std::fmt::Debug;
use std::hash::Hash;
use num_traits::{Float, Zero};

/// Identity of a node: unique within a graph, ordered for tie-breaking
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<N> NodeKey for N where N: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

/// Numeric type usable as an edge weight or a path distance
///
/// Implemented for every float-like type, in practice `f64` and
/// `OrderedFloat<f64>`. `W::infinity()` is the "unreached" distance.
pub trait Weight: Float + Zero + Debug + Copy + Send + Sync + 'static {}

impl<W> Weight for W where W: Float + Zero + Debug + Copy + Send + Sync + 'static {}

/// An outgoing edge stored in an adjacency list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    /// Slot of the target node
    pub to: usize,
    /// Non-negative edge weight
    pub weight: W,
}

/// Read-only, slot-indexed view of a weighted directed graph
///
/// Nodes are addressed by dense slots `0..node_count()` assigned in
/// insertion order. This is the view the shortest path engine runs on;
/// id-based construction and lookup live on the concrete graph type.
pub trait Graph<W>: Debug
where
    W: Weight,
{
    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns true if the slot refers to a node of the graph
    fn has_node(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Returns the outgoing edges of a node in insertion order
    ///
    /// An out-of-range slot yields an empty slice.
    fn out_edges(&self, node: usize) -> &[Edge<W>];

    /// Rank of every slot when nodes are sorted by id
    ///
    /// `ranks[a] < ranks[b]` iff node `a` has the lower id. Used to break
    /// ties between equal distances deterministically.
    fn tie_break_ranks(&self) -> Vec<usize>;
}
