//! The default action: pack a local directory.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use baler_config::options::{OutputFormat, RawOptions, ResolvedConfig};
use baler_core::{PackEngine, PackRequest};

use crate::actions::PackOutcome;
use crate::report;

/// Pack the positional target directory.
pub async fn run_default_action(
    target: &str,
    cwd: &Path,
    opts: &RawOptions,
    engine: &dyn PackEngine,
) -> Result<PackOutcome> {
    let path = resolve_target(target, cwd);
    let config = ResolvedConfig::from_raw(opts);
    let request = PackRequest::local(path.clone(), OutputFormat::default(), config.clone());

    info!(path = %path.display(), "packing local directory");
    let pack_result = engine.pack(&request).await?;
    report::print_summary(&config, &pack_result);

    Ok(PackOutcome {
        config,
        pack_result,
    })
}

/// Resolve the positional target against the working directory.
///
/// Absolute targets are used as-is; relative ones are joined onto `cwd`.
fn resolve_target(target: &str, cwd: &Path) -> PathBuf {
    let path = Path::new(target);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
