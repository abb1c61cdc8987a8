//! Plain configuration structs for the binaries and batch runners.
//!
//! Every value that the command line tools would otherwise ask for
//! interactively is a field here; configs are loaded from JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::algorithm::dijkstra::Strategy;
use crate::graph::generators::{generate_random_graph, Density};
use crate::graph::io::{read_adjacency_list, read_matrix_file, LoadedGraph};
use crate::{Error, Result};

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Builds a seeded RNG, or one seeded from entropy when no seed is given
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Where the graph of a single run comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphSource {
    /// `.adj` adjacency list file
    AdjacencyList { path: PathBuf },
    /// JSON adjacency matrix file
    Matrix { path: PathBuf },
    /// Random graph generated in memory
    Generated {
        nodes: usize,
        density: Density,
        #[serde(default = "default_weight_range")]
        weight_range: (u32, u32),
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn default_weight_range() -> (u32, u32) {
    (1, 10)
}

impl GraphSource {
    /// Loads or generates the graph; node ids become strings
    pub fn load(&self) -> Result<LoadedGraph> {
        match self {
            GraphSource::AdjacencyList { path } => read_adjacency_list(path),
            GraphSource::Matrix { path } => read_matrix_file(path)?.relabel(|id| id.to_string()),
            GraphSource::Generated {
                nodes,
                density,
                weight_range,
                seed,
            } => {
                let mut rng = make_rng(*seed);
                let graph = generate_random_graph(
                    *nodes,
                    *weight_range,
                    density.resolve(*nodes),
                    None,
                    &mut rng,
                )?;
                graph.relabel(|id| id.to_string())
            }
        }
    }
}

/// Configuration of a single comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub graph: GraphSource,
    /// Source node id; the first node of the graph when absent
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default = "default_strategies")]
    pub strategies: Vec<Strategy>,
    /// Print the adjacency list and enable debug logging
    #[serde(default)]
    pub debug: bool,
}

fn default_strategies() -> Vec<Strategy> {
    Strategy::ALL.to_vec()
}

impl RunConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }

    /// Config for running every strategy on an `.adj` file from its first node
    pub fn for_adjacency_file<P: Into<PathBuf>>(path: P) -> Self {
        RunConfig {
            graph: GraphSource::AdjacencyList { path: path.into() },
            source: None,
            strategies: default_strategies(),
            debug: false,
        }
    }

    /// Slot of the configured source node in `graph`
    pub fn source_slot(&self, graph: &LoadedGraph) -> Result<usize> {
        match &self.source {
            Some(id) => graph.index_of(id.as_str()),
            None if graph.nodes().is_empty() => {
                Err(Error::Config("graph has no nodes to start from".to_string()))
            }
            None => Ok(0),
        }
    }
}

/// Configuration for bulk generation of random graphs into density folders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Folder receiving one `density_<i>` subfolder per density
    pub primary_folder: PathBuf,
    pub node_counts: Vec<usize>,
    pub densities: Vec<Density>,
    /// How many graphs to create for each size within a density group
    #[serde(default = "default_graphs_per_size")]
    pub graphs_per_size: usize,
    /// Inclusive range of integer edge weights
    #[serde(default = "default_weight_range")]
    pub weight_range: (u32, u32),
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_graphs_per_size() -> usize {
    1
}

impl GenerationConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_counts.is_empty() {
            return Err(Error::Config("node_counts must not be empty".to_string()));
        }
        if self.densities.is_empty() {
            return Err(Error::Config("densities must not be empty".to_string()));
        }
        if self.weight_range.0 > self.weight_range.1 {
            return Err(Error::Config(format!(
                "weight range {:?} is empty",
                self.weight_range
            )));
        }
        Ok(())
    }

    /// Total number of graphs this config produces
    pub fn graph_count(&self) -> usize {
        self.densities.len() * self.node_counts.len() * self.graphs_per_size
    }
}
