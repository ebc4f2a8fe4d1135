#![deny(unsafe_code)]

//! Baler core runtime.
//!
//! Provides the shared machinery behind both entry points: the packaging
//! engine boundary, the HTTP pack service, and process-level services such
//! as the host-capacity worker bound. The CLI and the server binary are thin
//! shells over this crate.

use std::future::Future;
use std::pin::Pin;

/// A type-erased, `Send`-safe, boxed future — the standard return type for async
/// trait methods that require dynamic dispatch (`dyn Trait`).
///
/// Native `async fn` in traits (stable since Rust 1.75) produces opaque return
/// types that are **not** object-safe. Traits consumed via `Box<dyn Trait>` or
/// `&dyn Trait` must return a concrete `Pin<Box<dyn Future>>` instead. This
/// alias keeps those signatures readable.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// HTTP pack service — admission control, validation, and classification.
pub mod api;
/// Compile-time build metadata (version, git hash, profile).
pub mod build_info;
/// Host-capacity worker bound for the packaging engine.
pub mod concurrency;
/// Packaging engine boundary and the external process engine.
pub mod engine;

pub use engine::{
    EngineError, PackEngine, PackRequest, PackResult, PackTarget, ProcessEngine, SuspiciousFile,
};
