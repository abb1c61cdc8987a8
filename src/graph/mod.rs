pub mod traits;
pub mod directed;
pub mod generators;
pub mod io;

pub use traits::{Edge, Graph, NodeKey, Weight};
pub use directed::DirectedGraph;
