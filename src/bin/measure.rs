use std::env;
use std::path::PathBuf;
use std::time::Instant;

use dijkstra_ops::measure::{measure_densities, write_report};
use log::info;

const REPORT_FILE: &str = "densities.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // usage: measure <primary_folder> [report.json]
    let args: Vec<String> = env::args().collect();
    let primary_folder = PathBuf::from(
        args.get(1)
            .ok_or("usage: measure <primary_folder> [report.json]")?,
    );
    let report_path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| primary_folder.join(REPORT_FILE));

    let start = Instant::now();
    let report = measure_densities(&primary_folder)?;
    let graphs: usize = report
        .iter()
        .flat_map(|groups| groups.values())
        .map(|records| records.len())
        .sum();

    write_report(&report, &report_path)?;
    info!(
        "Measured {} graphs in {} density folders in {:?}; report written to {}",
        graphs,
        report.len(),
        start.elapsed(),
        report_path.display()
    );

    for (i, groups) in report.iter().enumerate() {
        println!("density group {}", i);
        for (n, records) in groups {
            let count = records.len() as f64;
            let naive = records.iter().map(|r| r.naive_ops as f64).sum::<f64>() / count;
            let heap = records.iter().map(|r| r.heap_ops as f64).sum::<f64>() / count;
            println!(
                "  n = {:>6}: naive {:>12.1}  heap {:>12.1}  ratio {:>6.2}",
                n,
                naive,
                heap,
                naive / heap.max(1.0)
            );
        }
    }

    Ok(())
}
