//! Dijkstra Ops - naive vs. binary-heap Dijkstra with operation counting
//!
//! This library implements two variants of Dijkstra's single-source shortest
//! path algorithm over the same graph type: an O(V²) linear-scan version and
//! an O((V + E) log V) binary-heap version with lazy decrease-key. Every run
//! counts its primitive operations (comparisons, extractions, relaxation
//! attempts and successes) so the two variants can be compared empirically
//! across graph size and density.

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod graph;
pub mod measure;
pub mod web;

/// Re-export main types for convenient use
pub use algorithm::{
    dijkstra::{shortest_paths_from, HeapDijkstra, NaiveDijkstra, Strategy},
    engine::{DijkstraEngine, EngineState},
    reconstruct_path, RunMetadata, RunResult, ShortestPathAlgorithm,
};
pub use data_structures::{OperationCounter, OperationCounts};
pub use graph::directed::DirectedGraph;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    #[error("Invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    #[error("Cannot {operation} while the engine is {state}")]
    InvalidState {
        operation: &'static str,
        state: EngineState,
    },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid adjacency matrix: {0}")]
    InvalidMatrix(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
