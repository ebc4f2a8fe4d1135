#![deny(unsafe_code)]

//! Baler server — standalone HTTP entry point for the pack API.
//!
//! Thin shell around [`baler_core::api`]: loads configuration, installs
//! logging at the configured level, wires up the process engine, and
//! serves until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use baler_config::AppConfig;
use baler_core::api;
use baler_core::{PackEngine, ProcessEngine, concurrency};

#[derive(Parser, Debug)]
#[command(name = "baler-server", version, about = "HTTP pack API for Baler")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "baler.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging level comes from the config, so load it before installing
    // the subscriber and report the source afterwards.
    let loaded = if cli.config.exists() {
        Some(AppConfig::load(&cli.config).await.with_context(|| {
            format!("failed to load configuration from {}", cli.config.display())
        })?)
    } else {
        None
    };
    let from_file = loaded.is_some();
    let config = loaded.unwrap_or_default();

    init_logging(&config.logging.level);
    if from_file {
        info!(path = %cli.config.display(), "configuration loaded");
    } else {
        info!(path = %cli.config.display(), "config file not found, using defaults");
    }
    info!(
        workers = concurrency::process_concurrency(),
        "engine worker bound for this host"
    );

    let engine: Arc<dyn PackEngine> = Arc::new(ProcessEngine::from_config(&config.engine));
    api::serve(&config, engine)
        .await
        .context("pack API server failed")?;
    Ok(())
}

fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .try_init();
}
