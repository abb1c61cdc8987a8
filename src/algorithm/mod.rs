pub mod traits;
pub mod engine;
pub mod dijkstra;

pub use traits::{reconstruct_path, RunMetadata, RunResult, ShortestPathAlgorithm};
