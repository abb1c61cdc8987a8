use dijkstra_ops::web::server::{start_server_with_config, ServerConfig};
use log::{info, warn};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments: [port] [static_dir]
    let args: Vec<String> = env::args().collect();
    let mut config = ServerConfig::default();
    if let Some(port) = args.get(1) {
        match port.parse() {
            Ok(port) => config.port = port,
            Err(_) => warn!("Ignoring invalid port '{}', using {}", port, config.port),
        }
    }
    if let Some(static_dir) = args.get(2) {
        config.static_dir = static_dir.clone();
    }

    info!(
        "Port: {}, static files: {}, CORS enabled: {}, max sessions: {}",
        config.port, config.static_dir, config.enable_cors, config.max_sessions
    );

    start_server_with_config(config).await?;

    Ok(())
}
