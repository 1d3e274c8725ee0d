//! Catalog query service.

use anyhow::{Context, Result};
use catalog_server::{router, AppState, DatasetSource};
use clap::Parser;
use shared::Config;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Address to bind, overrides `server.bind`
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Dataset file, overrides `data.dataset_file`
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let mut log_config = shared::LogConfig::from_config(&config, "catalog-server");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    info!("Catalog server starting");
    if args.config.exists() {
        info!(config_file = %args.config.display(), "Loaded configuration");
    } else {
        warn!(config_file = %args.config.display(), "Config file not found, using defaults");
    }

    let dataset_path = args.dataset.unwrap_or_else(|| config.dataset_path());
    if !dataset_path.exists() {
        // Not fatal: the file is read per request and may appear later
        warn!(path = %dataset_path.display(), "Dataset file not found");
    }

    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => config
            .server
            .bind
            .parse()
            .with_context(|| format!("Invalid server.bind address: {}", config.server.bind))?,
    };

    info!(
        dataset = %dataset_path.display(),
        default_search_limit = config.server.default_search_limit,
        "Runtime configuration"
    );

    let state = AppState::new(
        DatasetSource::new(&dataset_path),
        config.server.default_search_limit,
    );
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    info!("HTTP server listening on {}", bind_addr);
    info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Catalog server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
