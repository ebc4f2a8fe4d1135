//! The init action: write a starter configuration file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use baler_config::AppConfig;

const CONFIG_FILE_NAME: &str = "baler.toml";

/// Write a default `baler.toml` into `cwd`.
///
/// Refuses to clobber an existing file unless `force` is set. The file
/// is a full serialization of the defaults, so every knob is visible
/// and documented by its own value.
pub async fn run_init_action(cwd: &Path, force: bool) -> Result<()> {
    let path = cwd.join(CONFIG_FILE_NAME);

    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let rendered = toml::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default configuration")?;
    tokio::fs::write(&path, rendered)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "wrote starter configuration");
    println!("Created {}", path.display());
    Ok(())
}
