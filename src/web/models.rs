use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::algorithm::dijkstra::Strategy;
use crate::data_structures::OperationCounts;
use crate::graph::generators::Density;

/// Represents a node in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: usize,
    pub label: String,
}

/// Represents an edge in the graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Represents a complete graph for web visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

/// Parameters for graph generation
#[derive(Debug, Deserialize)]
pub struct GraphGenerationRequest {
    pub node_count: usize,
    #[serde(default = "default_density")]
    pub density: Density,
    #[serde(default = "default_weight_range")]
    pub weight_range: (u32, u32),
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_density() -> Density {
    Density::PerNode { edges: 3.0 }
}

fn default_weight_range() -> (u32, u32) {
    (1, 10)
}

/// Parameters for a single algorithm run
#[derive(Debug, Deserialize)]
pub struct AlgorithmRequest {
    pub strategy: Strategy,
    pub source: usize,
    /// Node whose shortest path should be reconstructed
    #[serde(default)]
    pub target: Option<usize>,
}

/// Parameters for running both strategies
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub source: usize,
    #[serde(default)]
    pub target: Option<usize>,
}

/// Response containing algorithm execution results
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmResponse {
    pub execution_id: Uuid,
    pub strategy: Strategy,
    pub source: usize,
    pub execution_time_ms: f64,
    pub node_count: usize,
    pub edge_count: usize,
    pub reachable_count: usize,
    /// Finite distances only; unreachable nodes are absent
    pub distances: HashMap<usize, f64>,
    pub predecessors: HashMap<usize, Option<usize>>,
    pub finalization_order: Vec<usize>,
    pub counts: OperationCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<usize>>,
}

/// Both strategies on the same graph and source
#[derive(Debug, Clone, Serialize)]
pub struct CompareResponse {
    pub naive: AlgorithmResponse,
    pub heap: AlgorithmResponse,
    /// True when both runs produced the same distance table
    pub distances_match: bool,
}

/// Benchmark configuration: random graphs measured with both strategies
#[derive(Debug, Deserialize)]
pub struct BenchmarkRequest {
    pub node_counts: Vec<usize>,
    pub densities: Vec<Density>,
    #[serde(default = "default_graphs_per_size")]
    pub graphs_per_size: usize,
    #[serde(default = "default_weight_range")]
    pub weight_range: (u32, u32),
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_graphs_per_size() -> usize {
    1
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session containing graph data and execution history
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraph,
    pub last_result: Option<AlgorithmResponse>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WebGraph) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            last_result: None,
            created_at: Utc::now(),
        }
    }
}
