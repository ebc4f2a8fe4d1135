//! HTTP pack service — remote packing over JSON.
//!
//! The service accepts pack requests, applies boundary policies before any
//! business logic runs, and converts every downstream failure into exactly
//! one classified wire error.
//!
//! ## Request path
//!
//! ```text
//! ┌────────┐  POST /api/pack  ┌────────────────────────────┐
//! │ Caller │─────────────────▶│  Admission control         │
//! └────────┘                  │  (CORS / size / deadline)  │
//!                             └─────────────┬──────────────┘
//!                                           │
//!                             ┌─────────────▼──────────────┐
//!                             │  Validation + identity     │
//!                             └─────────────┬──────────────┘
//!                                           │
//!                             ┌─────────────▼──────────────┐
//!                             │  PackEngine (external)     │
//!                             └─────────────┬──────────────┘
//!                                           │
//!                           PackResult JSON │ classified error JSON
//! ```

pub mod classify;
pub mod identity;
pub mod server;
pub mod validate;

pub use classify::{ClassifiedError, ErrorBody, PackFailure, classify};
pub use server::{ApiState, router, serve};
pub use validate::RemoteRequest;
