//! Canned packaging engines for tests.
//!
//! These doubles stand in for the external engine so entry-point tests can
//! exercise dispatch, admission, and classification without spawning a
//! process: [`StubEngine`] answers with a fixed result and records what it
//! was asked, [`FailingEngine`] always fails with a chosen error, and
//! [`SlowEngine`] sleeps long enough to trip deadline tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use baler_core::{BoxFuture, EngineError, PackEngine, PackRequest, PackResult, SuspiciousFile};

/// A fixed, non-trivial pack result for assertions.
pub fn sample_pack_result() -> PackResult {
    let mut file_char_counts = BTreeMap::new();
    file_char_counts.insert("src/main.rs".to_string(), 1200);
    file_char_counts.insert("README.md".to_string(), 300);

    let mut file_token_counts = BTreeMap::new();
    file_token_counts.insert("src/main.rs".to_string(), 340);
    file_token_counts.insert("README.md".to_string(), 80);

    PackResult {
        total_files: 2,
        total_characters: 1500,
        total_tokens: 420,
        file_char_counts,
        file_token_counts,
        suspicious_files_results: Vec::new(),
    }
}

/// A pack result carrying one security finding.
pub fn flagged_pack_result() -> PackResult {
    let mut result = sample_pack_result();
    result.suspicious_files_results.push(SuspiciousFile {
        file_path: ".env".to_string(),
        messages: vec!["possible credential".to_string()],
    });
    result
}

/// Engine that returns a canned result and records every request.
pub struct StubEngine {
    result: PackResult,
    requests: Mutex<Vec<PackRequest>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self::with_result(sample_pack_result())
    }

    pub fn with_result(result: PackResult) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, in arrival order.
    pub fn requests(&self) -> Vec<PackRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PackEngine for StubEngine {
    fn name(&self) -> &str {
        "stub"
    }

    fn pack(&self, request: &PackRequest) -> BoxFuture<'_, Result<PackResult, EngineError>> {
        self.requests.lock().unwrap().push(request.clone());
        let result = self.result.clone();
        Box::pin(async move { Ok(result) })
    }
}

/// Engine that fails every invocation with a clone of the given error.
pub struct FailingEngine {
    error: EngineError,
}

impl FailingEngine {
    pub fn new(error: EngineError) -> Self {
        Self { error }
    }
}

impl PackEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn pack(&self, _request: &PackRequest) -> BoxFuture<'_, Result<PackResult, EngineError>> {
        let error = self.error.clone();
        Box::pin(async move { Err(error) })
    }
}

/// Engine that sleeps before answering, for deadline tests.
pub struct SlowEngine {
    delay: Duration,
    result: PackResult,
}

impl SlowEngine {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            result: sample_pack_result(),
        }
    }
}

impl PackEngine for SlowEngine {
    fn name(&self) -> &str {
        "slow"
    }

    fn pack(&self, _request: &PackRequest) -> BoxFuture<'_, Result<PackResult, EngineError>> {
        let delay = self.delay;
        let result = self.result.clone();
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(result)
        })
    }
}
