#![deny(unsafe_code)]

//! Baler CLI — pack a repository into a single AI-friendly artifact.

mod actions;
mod args;
mod dispatch;
mod report;

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use baler_config::AppConfig;
use baler_core::ProcessEngine;

use crate::args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let opts = cli.raw_options();

    // Verbosity applies before anything else runs, whichever action wins.
    dispatch::init_logging(opts.verbose.unwrap_or(false));

    let config = load_config(&cli.config).await?;
    let engine = ProcessEngine::from_config(&config.engine);
    let cwd = env::current_dir().context("cannot determine working directory")?;

    dispatch::execute_action(&cli.target, &cwd, &opts, &engine).await?;
    Ok(())
}

async fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::load(path)
            .await
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    } else {
        info!(path = %path.display(), "config file not found, using defaults");
        Ok(AppConfig::default())
    }
}
