//! Router-level tests for the pack API under the default server policy.
//!
//! Drive `/health` and `/api/pack` through oneshot requests with a stub
//! engine: happy-path dispatch, body-size admission at the exact ceiling,
//! malformed-body rejection, and CORS preflight grants.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use baler_config::ServerConfig;
use baler_core::api::{ApiState, router};
use baler_core::engine::{PackResult, PackTarget};
use baler_test_utils::engines::StubEngine;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_state(engine: Arc<StubEngine>) -> Arc<ApiState> {
    Arc::new(ApiState::new(engine, ServerConfig::default()))
}

fn pack_request(body: &Value) -> Request<Body> {
    Request::post("/api/pack")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = router(test_state(Arc::new(StubEngine::new())));
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_pack_endpoint_returns_engine_result() {
    let engine = Arc::new(StubEngine::new());
    let app = router(test_state(engine.clone()));

    let req = pack_request(&json!({
        "url": "https://github.com/acme/widgets",
        "format": "xml",
    }));
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let result: PackResult = serde_json::from_slice(&body).unwrap();
    assert_eq!(result, baler_test_utils::engines::sample_pack_result());

    let seen = engine.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].target,
        PackTarget::Remote {
            url: "https://github.com/acme/widgets".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_body_object_is_rejected() {
    let app = router(test_state(Arc::new(StubEngine::new())));
    let resp = app.oneshot(pack_request(&json!({}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["error"], json!("Repository URL is required"));
}

#[tokio::test]
async fn test_unparseable_body_is_rejected() {
    let app = router(test_state(Arc::new(StubEngine::new())));
    let req = Request::post("/api/pack")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed["error"], json!("Invalid request body"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected_before_validation() {
    let engine = Arc::new(StubEngine::new());
    let app = router(test_state(engine.clone()));

    let oversized = vec![b'x'; 50 * 1024 + 1];
    let req = Request::post("/api/pack")
        .header("content-type", "application/json")
        .body(Body::from(oversized))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"overflow :(");
    assert_eq!(engine.call_count(), 0);
}

#[tokio::test]
async fn test_body_at_the_ceiling_is_admitted() {
    let app = router(test_state(Arc::new(StubEngine::new())));

    // Pad a valid request up to exactly the ceiling with a junk key.
    let mut body = serde_json::to_vec(&json!({
        "url": "https://github.com/acme/widgets",
        "format": "plain",
        "padding": "",
    }))
    .unwrap();
    let pad = 50 * 1024 - body.len();
    let padded = json!({
        "url": "https://github.com/acme/widgets",
        "format": "plain",
        "padding": "x".repeat(pad),
    });
    body = serde_json::to_vec(&padded).unwrap();
    assert_eq!(body.len(), 50 * 1024);

    let req = Request::post("/api/pack")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_preflight_from_allowed_origin() {
    let app = router(test_state(Arc::new(StubEngine::new())));
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/pack")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}

#[tokio::test]
async fn test_preflight_from_unlisted_origin_gets_no_grant() {
    let app = router(test_state(Arc::new(StubEngine::new())));
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/pack")
        .header("origin", "https://evil.example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.headers().get("access-control-allow-origin").is_none());
}
