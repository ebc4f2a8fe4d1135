//! Total mapping from pipeline failures to wire errors.
//!
//! Every failure raised after admission passes through [`classify`], which
//! yields exactly one `{message, status}` pair. Recognized engine failure
//! kinds get the most specific status; everything else collapses into a
//! generic 500 with a stable message, so no internal detail leaks to
//! callers and no failure goes unclassified.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

use super::validate::ValidationError;

/// JSON payload for classified failures: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Any failure the pack pipeline can raise after admission.
#[derive(Debug, thiserror::Error)]
pub enum PackFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// A wire-level error: stable caller-facing message plus HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub message: String,
    pub status: StatusCode,
}

/// Map a pipeline failure to its wire error.
pub fn classify(failure: &PackFailure) -> ClassifiedError {
    match failure {
        PackFailure::Validation(err) => ClassifiedError {
            message: err.to_string(),
            status: StatusCode::BAD_REQUEST,
        },
        PackFailure::Engine(err) => classify_engine(err),
    }
}

fn classify_engine(err: &EngineError) -> ClassifiedError {
    let (status, message) = match err {
        EngineError::InvalidRemote(_) => {
            (StatusCode::BAD_REQUEST, "Invalid repository URL provided")
        }
        EngineError::Unreachable(_) => {
            (StatusCode::BAD_GATEWAY, "Failed to retrieve the repository")
        }
        EngineError::OutputTooLarge(_) => (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Packed output exceeds the size limit",
        ),
        EngineError::Timeout(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            "Repository processing timed out",
        ),
        EngineError::Spawn(_) | EngineError::Failed { .. } | EngineError::Protocol(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An unexpected error occurred while packing",
        ),
    };
    ClassifiedError {
        message: message.to_string(),
        status,
    }
}

impl IntoResponse for ClassifiedError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
