use crate::graph::DirectedGraph;
use crate::{Error, Result};
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Target density of a generated graph, possibly depending on its size `n`
///
/// Density is the ratio of edges to the `n * (n - 1)` possible edges, so
/// every node gets on average `density * (n - 1)` outgoing edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Density {
    /// The same density for every size
    Fixed { value: f64 },
    /// `scale * ln(n) / n`
    LogOverN { scale: f64 },
    /// A fixed average out-degree, `edges / (n - 1)`
    PerNode { edges: f64 },
}

impl Density {
    /// Density for a graph with `n` nodes, clamped to `[0, 1]`
    pub fn resolve(&self, n: usize) -> f64 {
        if n < 2 {
            return 0.0;
        }
        let n = n as f64;
        let density = match *self {
            Density::Fixed { value } => value,
            Density::LogOverN { scale } => scale * n.ln() / n,
            Density::PerNode { edges } => edges / (n - 1.0),
        };
        density.clamp(0.0, 1.0)
    }
}

/// Generates a random directed graph with `n` nodes and the given density
///
/// Each node draws its out-degree from a normal distribution around
/// `density * (n - 1)` (standard deviation `std_dev`, defaulting to 20% of
/// the mean), clamped to `[0, n - 1]`, then picks that many distinct heads
/// other than itself. Weights are integers drawn uniformly from the
/// inclusive `weight_range`. The result is not guaranteed to be connected.
pub fn generate_random_graph<R: Rng>(
    n: usize,
    weight_range: (u32, u32),
    density: f64,
    std_dev: Option<f64>,
    rng: &mut R,
) -> Result<DirectedGraph<usize, OrderedFloat<f64>>> {
    let (low, high) = weight_range;
    if low > high {
        return Err(Error::Config(format!(
            "weight range {}..={} is empty",
            low, high
        )));
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::Config(format!("density {} outside [0, 1]", density)));
    }

    let mut graph = DirectedGraph::with_nodes(n);
    if n < 2 {
        return Ok(graph);
    }

    let mean = density * (n - 1) as f64;
    let std_dev = std_dev.unwrap_or(0.2 * mean);
    let degrees = Normal::new(mean, std_dev)
        .map_err(|err| Error::Config(format!("out-degree std_dev {}: {}", std_dev, err)))?;

    for tail in 0..n {
        let out_degree = degrees.sample(rng).round().clamp(0.0, (n - 1) as f64) as usize;

        // Sample among the n - 1 other nodes, skipping over the tail itself
        for pick in rand::seq::index::sample(rng, n - 1, out_degree) {
            let head = if pick >= tail { pick + 1 } else { pick };
            let weight = rng.gen_range(low..=high) as f64;
            graph.add_edge_by_slot(tail, head, OrderedFloat(weight))?;
        }
    }

    Ok(graph)
}

/// Generates a `width` x `height` grid with unit weights in both directions
/// between 4-neighbours
pub fn generate_grid(width: usize, height: usize) -> Result<DirectedGraph<usize, OrderedFloat<f64>>> {
    let mut graph = DirectedGraph::with_nodes(width * height);

    let index = |x: usize, y: usize| -> usize { y * width + x };

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            let mut neighbors = Vec::with_capacity(4);
            if x > 0 {
                neighbors.push(index(x - 1, y));
            }
            if x + 1 < width {
                neighbors.push(index(x + 1, y));
            }
            if y > 0 {
                neighbors.push(index(x, y - 1));
            }
            if y + 1 < height {
                neighbors.push(index(x, y + 1));
            }
            for neighbor in neighbors {
                graph.add_edge_by_slot(current, neighbor, OrderedFloat(1.0))?;
            }
        }
    }

    Ok(graph)
}
