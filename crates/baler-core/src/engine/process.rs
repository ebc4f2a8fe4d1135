//! External packaging engine invoked as a child process.
//!
//! Protocol: one JSON request document on the engine's stdin, then EOF.
//! On success the engine exits 0 with a result document on stdout. On a
//! recognized failure it exits non-zero with a failure document on
//! stdout: `{"error": {"kind": "...", "message": "..."}}`. Anything else
//! on stdout is a protocol violation. The request document extends
//! [`PackRequest`] with the host-capacity worker bound; the engine is the
//! only consumer of that bound.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use baler_config::EngineConfig;

use crate::BoxFuture;
use crate::concurrency::process_concurrency;

use super::{EngineError, PackEngine, PackRequest, PackResult};

/// Packaging engine run as an external executable.
pub struct ProcessEngine {
    /// Engine executable to invoke.
    command: PathBuf,
    /// Extra arguments passed before the request is written.
    args: Vec<String>,
    /// Wall-clock deadline for one invocation, if any.
    timeout: Option<Duration>,
}

impl ProcessEngine {
    /// Create an engine for the given executable.
    pub fn new(command: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout: None,
        }
    }

    /// Abandon invocations that outlive `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build an engine from the `[engine]` configuration section.
    ///
    /// A `timeout_secs` of zero means no deadline.
    pub fn from_config(config: &EngineConfig) -> Self {
        let engine = Self::new(&config.command, config.args.clone());
        match config.timeout_secs {
            0 => engine,
            secs => engine.with_timeout(Duration::from_secs(secs)),
        }
    }

    /// Serialize the request document written to the engine's stdin.
    fn encode_request(&self, request: &PackRequest) -> Result<Vec<u8>, EngineError> {
        let wire = WireRequest {
            request,
            max_workers: process_concurrency(),
        };
        serde_json::to_vec(&wire)
            .map_err(|e| EngineError::Protocol(format!("unencodable request document: {e}")))
    }

    async fn run(&self, payload: Vec<u8>) -> Result<PackResult, EngineError> {
        tracing::debug!(
            command = %self.command.display(),
            request_bytes = payload.len(),
            "invoking packaging engine"
        );

        let mut child = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::Spawn(format!("{}: {e}", self.command.display())))?;

        if let Some(mut stdin) = child.stdin.take() {
            // A failed write means the engine exited before reading the
            // request; the exit status below carries the real diagnosis.
            if let Err(e) = stdin.write_all(&payload).await {
                tracing::debug!(error = %e, "engine closed stdin before reading the request");
            }
        }

        // On deadline the child is abandoned, not killed; the engine owns
        // its own cleanup.
        let output = match self.timeout {
            Some(dur) => match tokio::time::timeout(dur, child.wait_with_output()).await {
                Ok(Ok(output)) => output,
                Ok(Err(e)) => {
                    return Err(EngineError::Spawn(format!("engine wait failed: {e}")));
                }
                Err(_) => {
                    return Err(EngineError::Timeout(dur));
                }
            },
            None => child
                .wait_with_output()
                .await
                .map_err(|e| EngineError::Spawn(format!("engine wait failed: {e}")))?,
        };

        if output.status.success() {
            decode_success(&output.stdout)
        } else {
            Err(decode_failure(
                &output.stdout,
                output.status.code().unwrap_or(-1),
                &output.stderr,
            ))
        }
    }
}

impl PackEngine for ProcessEngine {
    fn name(&self) -> &str {
        "process"
    }

    fn pack(&self, request: &PackRequest) -> BoxFuture<'_, Result<PackResult, EngineError>> {
        let payload = self.encode_request(request);
        Box::pin(async move { self.run(payload?).await })
    }
}

/// Request document written to the engine's stdin.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest<'a> {
    #[serde(flatten)]
    request: &'a PackRequest,
    max_workers: usize,
}

/// Failure document a failing engine prints to stdout.
#[derive(Debug, Deserialize)]
struct FailureDocument {
    error: FailureBody,
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    kind: String,
    message: String,
}

fn decode_success(stdout: &[u8]) -> Result<PackResult, EngineError> {
    serde_json::from_slice(stdout)
        .map_err(|e| EngineError::Protocol(format!("bad result document: {e}")))
}

fn decode_failure(stdout: &[u8], exit_code: i32, stderr: &[u8]) -> EngineError {
    if let Ok(failure) = serde_json::from_slice::<FailureDocument>(stdout) {
        return match failure.error.kind.as_str() {
            "invalid_remote" => EngineError::InvalidRemote(failure.error.message),
            "unreachable" => EngineError::Unreachable(failure.error.message),
            "output_too_large" => EngineError::OutputTooLarge(failure.error.message),
            // "internal" and unknown kinds report as plain failures.
            _ => EngineError::Failed {
                exit_code,
                stderr: failure.error.message,
            },
        };
    }
    EngineError::Failed {
        exit_code,
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    }
}
