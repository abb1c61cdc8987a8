//! Measurement collaborators: per-graph records, batch runs over density
//! folders, bulk graph generation and console summaries.

pub mod batch;
pub mod record;
pub mod summary;

pub use batch::{
    mass_create_from_config, mass_create_graphs, measure_densities, measure_file, measure_folder,
    write_report, DensityReport, SizeGroups,
};
pub use record::{measure_graph, RunRecord};
