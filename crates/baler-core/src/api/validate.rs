//! Admission-side validation of pack request bodies.
//!
//! Rules run in a fixed order and short-circuit on the first failure, so
//! a request missing both a URL and a valid format always reports the
//! missing URL. The `options` object is deliberately not validated:
//! extraction is permissive and malformed values degrade to defaults.

use serde_json::Value;

use baler_config::options::{OutputFormat, RawOptions};

/// A validated pack request, ready for the packaging engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    /// Remote repository URL, as supplied by the caller.
    pub url: String,

    /// Requested output format.
    pub format: OutputFormat,

    /// Caller-supplied options, extracted but not yet normalized.
    pub options: RawOptions,

    /// Resolved caller identity token.
    pub client_ip: String,
}

/// Validation failures, in rule order.
///
/// The display strings are the wire messages callers see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Repository URL is required")]
    MissingUrl,

    #[error("Invalid format specified")]
    InvalidFormat,

    #[error("Invalid request body")]
    MalformedBody,
}

/// Validate an untyped request body.
///
/// Order: the URL must be a non-empty string, then the format must name a
/// known output format. Later rules never run once an earlier one fails.
pub fn validate_pack_request(
    body: &Value,
    client_ip: String,
) -> Result<RemoteRequest, ValidationError> {
    let url = body
        .get("url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .ok_or(ValidationError::MissingUrl)?;

    let format = body
        .get("format")
        .and_then(Value::as_str)
        .and_then(OutputFormat::parse)
        .ok_or(ValidationError::InvalidFormat)?;

    let options = body
        .get("options")
        .map(RawOptions::from_value)
        .unwrap_or_default();

    Ok(RemoteRequest {
        url: url.to_string(),
        format,
        options,
        client_ip,
    })
}
