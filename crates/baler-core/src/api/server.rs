//! Pack API server — routes, admission layers, and handlers.
//!
//! Admission control runs before any business logic: the body-size
//! ceiling is enforced while reading the body, the per-request deadline
//! wraps `/api/pack`, and CORS admits only the configured origins.
//! `/health` sits outside the deadline and answers unconditionally.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use baler_config::options::ResolvedConfig;
use baler_config::{AppConfig, ServerConfig};

use crate::engine::{PackEngine, PackRequest};

use super::classify::{PackFailure, classify};
use super::identity::client_identity;
use super::validate::{ValidationError, validate_pack_request};

/// Shared state for API handlers.
pub struct ApiState {
    /// Engine invoked for every admitted pack request.
    pub engine: Arc<dyn PackEngine>,
    /// Boundary policy knobs (origins, body ceiling, deadline).
    pub server: ServerConfig,
}

impl ApiState {
    pub fn new(engine: Arc<dyn PackEngine>, server: ServerConfig) -> Self {
        Self { engine, server }
    }
}

/// Build the router with all routes and admission layers applied.
pub fn router(state: Arc<ApiState>) -> Router {
    let deadline = Duration::from_millis(state.server.request_timeout_ms);

    let api = Router::new()
        .route("/api/pack", post(handle_pack))
        .layer(TimeoutLayer::new(deadline));

    Router::new()
        .route("/health", get(handle_health))
        .merge(api)
        .layer(cors_layer(&state.server))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the pack API until interrupted.
///
/// Binds the configured address and shuts down gracefully on ctrl-c.
pub async fn serve(config: &AppConfig, engine: Arc<dyn PackEngine>) -> Result<(), std::io::Error> {
    let addr = format!(
        "{}:{}",
        config.server.listen_addr, config.server.listen_port
    );
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, engine = engine.name(), "pack API listening");

    let state = Arc::new(ApiState::new(engine, config.server.clone()));
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("pack API shutting down");
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86_400))
}

/// `GET /health` — liveness probe, independent of all other state.
async fn handle_health() -> &'static str {
    "OK"
}

/// `POST /api/pack` — admit, validate, resolve identity, invoke the engine.
///
/// The body is read through the size ceiling before any parsing, so an
/// oversized request is rejected with a plain-text 413 without ever
/// reaching validation.
async fn handle_pack(State(state): State<Arc<ApiState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, state.server.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(_) => {
            debug!(
                limit = state.server.max_body_bytes,
                "rejecting oversized pack request"
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, "overflow :(").into_response();
        }
    };

    let body: Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "rejecting unparseable pack request body");
            return classify(&PackFailure::Validation(ValidationError::MalformedBody))
                .into_response();
        }
    };

    let client_ip = client_identity(&parts.headers);

    let remote = match validate_pack_request(&body, client_ip) {
        Ok(remote) => remote,
        Err(err) => {
            debug!(error = %err, "rejecting invalid pack request");
            return classify(&PackFailure::Validation(err)).into_response();
        }
    };

    info!(
        url = %remote.url,
        format = remote.format.as_str(),
        client_ip = %remote.client_ip,
        "packing remote repository"
    );

    let pack_request = PackRequest::remote(
        remote.url.clone(),
        remote.format,
        ResolvedConfig::from_raw(&remote.options),
    )
    .with_client_ip(remote.client_ip);

    match state.engine.pack(&pack_request).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            error!(error = %err, url = %remote.url, "engine failed to pack repository");
            classify(&PackFailure::Engine(err)).into_response()
        }
    }
}

