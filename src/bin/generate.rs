use std::env;

use dijkstra_ops::config::GenerationConfig;
use dijkstra_ops::measure::mass_create_from_config;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).ok_or("usage: generate <generation.json>")?;
    let config = GenerationConfig::from_json_file(config_path)?;

    info!(
        "Generating {} graphs into {}",
        config.graph_count(),
        config.primary_folder.display()
    );
    let written = mass_create_from_config(&config)?;
    println!(
        "Wrote {} graphs below {}",
        written.len(),
        config.primary_folder.display()
    );

    Ok(())
}
