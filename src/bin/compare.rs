use std::env;
use std::path::Path;
use std::time::Instant;

use dijkstra_ops::config::RunConfig;
use dijkstra_ops::measure::summary::{adjacency_summary, counts_summary, distance_summary};
use dijkstra_ops::Strategy;
use log::info;

fn usage() -> String {
    "usage: compare <config.json | graph.adj> [source] [naive|heap]".to_string()
}

/// Builds the run config from the command line
///
/// A `.json` argument is read as a full run config; anything else is taken
/// as an adjacency list file, optionally followed by a source id and a
/// single strategy.
fn parse_args(args: &[String]) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let path = args.get(1).ok_or_else(usage)?;
    let is_json = Path::new(path)
        .extension()
        .map_or(false, |ext| ext == "json");

    if is_json {
        return Ok(RunConfig::from_json_file(path)?);
    }

    let mut config = RunConfig::for_adjacency_file(path);
    config.source = args.get(2).cloned();
    if let Some(strategy) = args.get(3) {
        config.strategies = vec![strategy.parse::<Strategy>()?];
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args)?;

    let graph = config.graph.load()?;
    let source = config.source_slot(&graph)?;
    info!(
        "Loaded graph with {} nodes and {} edges",
        graph.nodes().len(),
        graph.edges().count()
    );

    if config.debug {
        println!("Adjacency list:");
        print!("{}", adjacency_summary(&graph, None));
        println!();
    }

    for strategy in &config.strategies {
        let start = Instant::now();
        let result = strategy.run(&graph, source)?;
        let elapsed = start.elapsed();

        println!("== {} from {} ({:?}) ==", strategy, graph.nodes()[source], elapsed);
        if config.debug {
            print!("{}", adjacency_summary(&graph, Some(&result)));
        } else {
            print!("{}", distance_summary(&graph, &result));
        }
        print!("{}", counts_summary(&strategy.to_string(), &result.counts));
        println!();
    }

    Ok(())
}
