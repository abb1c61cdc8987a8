//! Reading and writing graphs as `.adj` adjacency lists and JSON matrices.
//!
//! An `.adj` file has one line per node: the node name followed by its
//! outgoing edges, tab separated, each edge written as `name,weight`:
//!
//! ```text
//! A	B,1	C,3
//! B	C,2
//! C
//! ```
//!
//! Blank lines are ignored and nodes are created in line order.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use ordered_float::OrderedFloat;

use crate::graph::{DirectedGraph, NodeKey, Weight};
use crate::{Error, Result};

/// Graph type produced by the file loaders
pub type LoadedGraph = DirectedGraph<String, OrderedFloat<f64>>;

/// Parses an adjacency list from any buffered reader
pub fn parse_adjacency_list<R: BufRead>(reader: R) -> Result<LoadedGraph> {
    let mut lines: Vec<(usize, Vec<String>)> = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let fields = trimmed.split('\t').map(|f| f.trim().to_string()).collect();
        lines.push((number + 1, fields));
    }

    // Register every node first so edges may point forward
    let mut graph = LoadedGraph::with_capacity(lines.len());
    for (_, fields) in &lines {
        graph.add_node(fields[0].clone())?;
    }

    for (line, fields) in &lines {
        let tail = graph.index_of(fields[0].as_str())?;
        for neighbor in fields.iter().skip(1).filter(|f| !f.is_empty()) {
            let (name, weight) = neighbor.split_once(',').ok_or_else(|| Error::Parse {
                line: *line,
                message: format!("expected `name,weight`, found `{}`", neighbor),
            })?;
            let weight: f64 = weight.trim().parse().map_err(|_| Error::Parse {
                line: *line,
                message: format!("invalid weight `{}`", weight.trim()),
            })?;
            let head = graph.index_of(name.trim()).map_err(|_| Error::Parse {
                line: *line,
                message: format!("edge to undeclared node `{}`", name.trim()),
            })?;
            graph.add_edge_by_slot(tail, head, OrderedFloat(weight))?;
        }
    }

    Ok(graph)
}

/// Reads an `.adj` file
pub fn read_adjacency_list<P: AsRef<Path>>(path: P) -> Result<LoadedGraph> {
    let file = File::open(path.as_ref())?;
    parse_adjacency_list(BufReader::new(file))
}

/// Writes a graph in `.adj` format to any writer
pub fn format_adjacency_list<N, W, O>(graph: &DirectedGraph<N, W>, mut out: O) -> Result<()>
where
    N: NodeKey + Display,
    W: Weight,
    O: Write,
{
    let nodes = graph.nodes();
    let mut edges = graph.edges().peekable();
    for (slot, id) in nodes.iter().enumerate() {
        write!(out, "{}", id)?;
        while let Some((_, edge)) = edges.next_if(|(from, _)| *from == slot) {
            let weight = edge.weight.to_f64().unwrap_or(f64::INFINITY);
            write!(out, "\t{},{}", nodes[edge.to], weight)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a graph to an `.adj` file
pub fn write_adjacency_list<N, W, P>(graph: &DirectedGraph<N, W>, path: P) -> Result<()>
where
    N: NodeKey + Display,
    W: Weight,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    format_adjacency_list(graph, BufWriter::new(file))
}

/// Reads a JSON adjacency matrix (`null` = no edge); node ids are row indices
pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> Result<DirectedGraph<usize, OrderedFloat<f64>>> {
    let file = File::open(path.as_ref())?;
    let matrix: Vec<Vec<Option<f64>>> = serde_json::from_reader(BufReader::new(file))?;
    DirectedGraph::from_matrix(&matrix)
}

/// Writes a graph as a JSON adjacency matrix
pub fn write_matrix_file<N, W, P>(graph: &DirectedGraph<N, W>, path: P) -> Result<()>
where
    N: NodeKey,
    W: Weight,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &graph.to_matrix())?;
    writer.flush()?;
    Ok(())
}
