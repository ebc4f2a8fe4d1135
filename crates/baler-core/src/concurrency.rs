//! Host-capacity worker bound for the packaging engine.
//!
//! The engine sizes its internal parallelism from a single positive bound
//! derived from the host's logical core count. The bound is computed on
//! first use and cached for the life of the process, so it never varies
//! with request volume or between invocations.

use std::sync::OnceLock;
use std::thread;

static WORKER_BOUND: OnceLock<usize> = OnceLock::new();

/// The positive worker bound for this process.
///
/// Equal to the host's logical core count, or 1 when the host cannot
/// report one. Deterministic for a given host.
pub fn process_concurrency() -> usize {
    *WORKER_BOUND.get_or_init(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
}
