//! Tracing setup for tests.
//!
//! Tests that exercise the engine boundary or the HTTP router emit
//! tracing events; routing them through the test-harness writer keeps
//! them attached to the failing test instead of interleaved on stderr.

use tracing_subscriber::EnvFilter;

/// Install a process-wide test subscriber, if none is installed yet.
///
/// Defaults to `debug` so engine invocations show their request and
/// decode steps in captured output; `RUST_LOG` overrides as usual.
/// Calling this from several tests is fine, later calls are no-ops.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
