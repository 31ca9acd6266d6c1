//! gamecat Server Binary
//!
//! Loads the catalog and starts the TCP server.

use std::sync::Arc;
use clap::Parser;
use gamecat::{Config, Engine};
use gamecat::network::Server;
use tracing_subscriber::{fmt, EnvFilter};

/// gamecat Server
#[derive(Parser, Debug)]
#[command(name = "gamecat-server")]
#[command(about = "Serves a video game catalog over TCP")]
#[command(version)]
struct Args {
    /// Port to listen on
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// CSV file with the game catalog
    #[arg(short, long, default_value = "./games.csv")]
    data: String,

    /// Maximum concurrent connections
    #[arg(short, long, default_value = "1024")]
    max_connections: usize,

    /// Read timeout per connection in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gamecat=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("gamecat Server v{}", gamecat::VERSION);
    tracing::info!("Catalog file: {}", args.data);

    // Build config from args
    let config = Config::builder()
        .data_path(&args.data)
        .listen_addr(format!("{}:{}", args.host, args.port))
        .max_connections(args.max_connections)
        .read_timeout_ms(args.read_timeout_ms)
        .build();

    // Load catalog
    let engine = match Engine::open(&config) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            tracing::error!("Failed to load catalog: {}", e);
            std::process::exit(1);
        }
    };

    // Start server
    let mut server = Server::new(config, engine);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
