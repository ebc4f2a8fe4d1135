//! Caller identity resolution from proxy headers.
//!
//! The service sits behind reverse proxies and edge networks, so the peer
//! address is useless; identity comes from forwarding headers instead. The
//! resolved value is an opaque token for downstream use — it is never
//! parsed or verified here, and resolution cannot fail.

use axum::http::HeaderMap;

/// Identity headers in precedence order.
const IDENTITY_HEADERS: [&str; 3] = ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"];

/// Sentinel identity used when no header carries a usable value.
pub const UNKNOWN_IDENTITY: &str = "0.0.0.0";

/// Resolve the caller identity for a request.
///
/// Checks the forwarding headers in fixed precedence order and returns the
/// first non-empty value verbatim; multi-hop lists are not split. Falls
/// back to [`UNKNOWN_IDENTITY`] so the result is always defined.
pub fn client_identity(headers: &HeaderMap) -> String {
    IDENTITY_HEADERS
        .iter()
        .find_map(|name| {
            headers
                .get(*name)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_IDENTITY.to_string())
}
