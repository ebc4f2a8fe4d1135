//! Packaging engine boundary.
//!
//! The content-aggregation pipeline (file traversal, ignore matching,
//! token counting, security scanning) lives outside this workspace.
//! [`PackEngine`] is the seam both entry points call through, and
//! [`ProcessEngine`] is the production implementation that invokes an
//! external engine executable over a JSON stdio protocol. Results pass
//! through untouched: nothing in this crate inspects or rewrites what
//! the engine produced.

mod process;

pub use process::ProcessEngine;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use baler_config::options::{OutputFormat, ResolvedConfig};

use crate::BoxFuture;

/// Errors from packaging engine invocations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("failed to launch engine {0}")]
    Spawn(String),

    #[error("invalid remote repository: {0}")]
    InvalidRemote(String),

    #[error("repository unreachable: {0}")]
    Unreachable(String),

    #[error("packed output too large: {0}")]
    OutputTooLarge(String),

    #[error("engine deadline exceeded after {0:?}")]
    Timeout(Duration),

    #[error("engine exited with code {exit_code}: {stderr}")]
    Failed { exit_code: i32, stderr: String },

    #[error("malformed engine output: {0}")]
    Protocol(String),
}

/// What the engine should pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PackTarget {
    /// A directory on the local filesystem.
    Local { path: PathBuf },
    /// A remote repository URL.
    Remote { url: String },
}

/// One pack invocation, as handed to a [`PackEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackRequest {
    /// What to pack.
    pub target: PackTarget,

    /// Output format for the packed artifact.
    pub format: OutputFormat,

    /// Total pack configuration after normalization.
    pub config: ResolvedConfig,

    /// Caller identity token, when the request arrived over HTTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
}

impl PackRequest {
    /// Request packing a local directory.
    pub fn local(path: impl Into<PathBuf>, format: OutputFormat, config: ResolvedConfig) -> Self {
        Self {
            target: PackTarget::Local { path: path.into() },
            format,
            config,
            client_ip: None,
        }
    }

    /// Request packing a remote repository.
    pub fn remote(url: impl Into<String>, format: OutputFormat, config: ResolvedConfig) -> Self {
        Self {
            target: PackTarget::Remote { url: url.into() },
            format,
            config,
            client_ip: None,
        }
    }

    /// Attach the caller identity token.
    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = Some(client_ip.into());
        self
    }
}

/// Aggregation metrics produced and owned by the engine.
///
/// Both entry points treat this as opaque: the CLI summarizes it, the
/// service serializes it back out, and neither recomputes a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackResult {
    /// Number of files included in the packed artifact.
    pub total_files: u64,

    /// Character count of the packed artifact.
    pub total_characters: u64,

    /// Token count of the packed artifact.
    pub total_tokens: u64,

    /// Per-file character counts, keyed by repository-relative path.
    #[serde(default)]
    pub file_char_counts: BTreeMap<String, u64>,

    /// Per-file token counts, keyed by repository-relative path.
    #[serde(default)]
    pub file_token_counts: BTreeMap<String, u64>,

    /// Files flagged by the engine's security scan.
    #[serde(default)]
    pub suspicious_files_results: Vec<SuspiciousFile>,
}

/// One file flagged by the engine's security scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousFile {
    /// Repository-relative path of the flagged file.
    pub file_path: String,

    /// Scanner findings for this file.
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Boundary to the packaging engine.
///
/// Implementations must be `Send + Sync` so both entry points can share
/// one engine. Uses `BoxFuture` for object safety (allows
/// `Arc<dyn PackEngine>`).
pub trait PackEngine: Send + Sync {
    /// Engine display name for logs.
    fn name(&self) -> &str;

    /// Run one pack invocation to completion.
    fn pack(&self, request: &PackRequest) -> BoxFuture<'_, Result<PackResult, EngineError>>;
}
