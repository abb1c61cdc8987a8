use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use rand::Rng;
use rayon::prelude::*;

use crate::config::{make_rng, GenerationConfig};
use crate::graph::generators::generate_random_graph;
use crate::graph::io::{read_adjacency_list, write_adjacency_list};
use crate::measure::record::{measure_graph, RunRecord};
use crate::{Error, Result};

/// Run records of one density folder, keyed by graph size
pub type SizeGroups = BTreeMap<usize, Vec<RunRecord>>;

/// One entry per density folder, in folder name order
pub type DensityReport = Vec<SizeGroups>;

const DENSITY_PREFIX: &str = "density_";
const GRAPH_EXTENSION: &str = "adj";

fn sorted_entries<F>(folder: &Path, keep: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut entries = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if keep(&path) {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Measures one `.adj` file from its first node
pub fn measure_file(path: &Path) -> Result<RunRecord> {
    let graph = read_adjacency_list(path)?;
    if graph.nodes().is_empty() {
        return Err(Error::Config(format!(
            "graph file '{}' has no nodes",
            path.display()
        )));
    }
    measure_graph(&file_name(path), &graph, 0)
}

/// Measures every `.adj` file of a folder and groups the records by size
///
/// Files are measured in parallel; within a size group records keep the
/// sorted file order.
pub fn measure_folder(folder: &Path) -> Result<SizeGroups> {
    let files = sorted_entries(folder, |path| {
        path.is_file() && path.extension().map_or(false, |ext| ext == GRAPH_EXTENSION)
    })?;
    let folder_name = file_name(folder);
    let total = files.len();

    let records: Vec<RunRecord> = files
        .par_iter()
        .enumerate()
        .map(|(i, path)| {
            info!(
                "Folder '{}': measuring '{}' ({}/{})",
                folder_name,
                file_name(path),
                i + 1,
                total
            );
            measure_file(path)
        })
        .collect::<Result<_>>()?;

    let mut groups = SizeGroups::new();
    for record in records {
        groups.entry(record.n).or_default().push(record);
    }
    Ok(groups)
}

/// Measures every `density_*` folder below `primary_folder`
pub fn measure_densities(primary_folder: &Path) -> Result<DensityReport> {
    let folders = sorted_entries(primary_folder, |path| {
        path.is_dir() && file_name(path).starts_with(DENSITY_PREFIX)
    })?;
    folders.iter().map(|folder| measure_folder(folder)).collect()
}

/// Serializes a density report as JSON
pub fn write_report<P: AsRef<Path>>(report: &DensityReport, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

/// Generates random graphs into `density_<i>/graph_<n>_<k>.adj` files
///
/// Returns the paths written, in generation order.
pub fn mass_create_graphs<R: Rng>(config: &GenerationConfig, rng: &mut R) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let mut written = Vec::with_capacity(config.graph_count());

    for (i, density) in config.densities.iter().enumerate() {
        let density_folder = config.primary_folder.join(format!("{}{}", DENSITY_PREFIX, i));
        fs::create_dir_all(&density_folder)?;

        for &n in &config.node_counts {
            for k in 0..config.graphs_per_size {
                let graph = generate_random_graph(n, config.weight_range, density.resolve(n), None, rng)?;
                let path = density_folder.join(format!("graph_{}_{}.{}", n, k, GRAPH_EXTENSION));
                write_adjacency_list(&graph, &path)?;
                written.push(path);
            }
        }
        info!("Density group {} ({:?}) written to {}", i, density, density_folder.display());
    }

    Ok(written)
}

/// [`mass_create_graphs`] with the RNG seeded from the config
pub fn mass_create_from_config(config: &GenerationConfig) -> Result<Vec<PathBuf>> {
    let mut rng = make_rng(config.seed);
    mass_create_graphs(config, &mut rng)
}
