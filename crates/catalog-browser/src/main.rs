//! Interactive terminal browser for the manga catalog.

use anyhow::{Context, Result};
use catalog_browser::render::HELP;
use catalog_browser::{Browser, CatalogClient, Runtime};
use clap::Parser;
use shared::logging::ConsoleTarget;
use shared::Config;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging (also echoed to stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Query service URL, overrides `browser.server_url`
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging; the terminal belongs to the catalog unless verbose
    let mut log_config = shared::LogConfig::from_config(&config, "catalog-browser");
    log_config.console = args.verbose;
    log_config.console_target = ConsoleTarget::Stderr;
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    if !args.config.exists() {
        warn!(config_file = %args.config.display(), "Config file not found, using defaults");
    }

    let server_url = args
        .server
        .unwrap_or_else(|| config.browser.server_url.clone());

    info!(
        server_url = %server_url,
        debounce_ms = config.browser.debounce_ms,
        search_limit = config.browser.search_limit,
        "Catalog browser starting"
    );

    let client = CatalogClient::new(
        server_url,
        Duration::from_secs(config.browser.request_timeout_secs),
    )
    .context("Failed to create catalog client")?;

    let runtime = Runtime::new(
        Browser::new(config.browser.search_limit),
        client,
        Duration::from_millis(config.browser.debounce_ms),
    );

    println!("{}", HELP);
    runtime
        .run(BufReader::new(tokio::io::stdin()), std::io::stdout())
        .await?;

    info!("Catalog browser finished");

    Ok(())
}
