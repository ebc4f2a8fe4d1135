//! Priority-ordered action selection and dispatch.
//!
//! Exactly one action runs per invocation. Selection is total: the
//! default action is always eligible, so no combination of flags can
//! leave an invocation with nothing to do.

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use baler_config::options::RawOptions;
use baler_core::PackEngine;

use crate::actions;
use crate::actions::PackOutcome;

/// The one pipeline an invocation executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Print version information.
    Version,
    /// Write a starter configuration file.
    Init,
    /// Pack a remote repository.
    Remote(String),
    /// Pack the local target directory.
    Default,
}

/// Pick the action for the given options.
///
/// Priority, highest first: version, init, non-empty remote, default.
/// When several flags are set at once only the highest-priority action
/// runs; the rest are ignored.
pub fn select_action(opts: &RawOptions) -> ActionKind {
    if opts.version.unwrap_or(false) {
        return ActionKind::Version;
    }
    if opts.init.unwrap_or(false) {
        return ActionKind::Init;
    }
    match opts.remote.as_deref() {
        Some(remote) if !remote.is_empty() => ActionKind::Remote(remote.to_string()),
        _ => ActionKind::Default,
    }
}

/// Run the selected action to completion.
///
/// Packing actions hand back a [`PackOutcome`]; version and init return
/// nothing. Failures propagate untouched; reporting them and setting
/// the exit status is `main`'s concern.
pub async fn execute_action(
    target: &str,
    cwd: &Path,
    opts: &RawOptions,
    engine: &dyn PackEngine,
) -> Result<Option<PackOutcome>> {
    match select_action(opts) {
        ActionKind::Version => {
            actions::run_version_action();
            Ok(None)
        }
        ActionKind::Init => {
            actions::run_init_action(cwd, opts.force.unwrap_or(false)).await?;
            Ok(None)
        }
        ActionKind::Remote(spec) => {
            let outcome = actions::run_remote_action(&spec, opts, engine).await?;
            Ok(Some(outcome))
        }
        ActionKind::Default => {
            let outcome = actions::run_default_action(target, cwd, opts, engine).await?;
            Ok(Some(outcome))
        }
    }
}

/// Install the process-wide logging context.
///
/// `RUST_LOG` wins when set; otherwise verbose selects `debug` over
/// `info`. Repeat calls are ignored, so the level is fixed for the
/// lifetime of the process.
pub fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .try_init();
}
