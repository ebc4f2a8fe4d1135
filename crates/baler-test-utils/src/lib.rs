#![deny(unsafe_code)]

//! Shared test utilities for the Baler workspace.
//!
//! Canned packaging engines, an `AppConfig` builder, and tracing setup,
//! shared so entry-point tests across crates stay small and uniform.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! baler-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod engines;
pub mod tracing_setup;
