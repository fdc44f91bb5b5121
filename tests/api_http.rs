// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/quote (shape + degraded flag)
// - GET /api/quote?tag=
// - GET /api/search (hit and no-matches shapes)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use quotidian::sources::SourceChain;
use quotidian::{api, Orchestrator};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Router backed by an orchestrator with no live sources: every quote comes
/// from the embedded pool, which keeps these tests offline and deterministic.
fn test_router() -> Router {
    let chain = SourceChain::new(Vec::new(), Duration::from_millis(100));
    let orchestrator = Orchestrator::new(chain, 9).expect("embedded pool");
    api::router(api::AppState {
        orchestrator: Arc::new(orchestrator),
    })
}

async fn get_json(app: Router, uri: &str) -> Json {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK, "GET {uri} should be 200");
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    serde_json::from_slice(&bytes).expect("parse json")
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "OK");
}

#[tokio::test]
async fn api_quote_always_returns_a_fully_populated_quote() {
    let v = get_json(test_router(), "/api/quote").await;

    // Contract checks for UI consumers
    assert!(!v["id"].as_str().unwrap_or_default().is_empty(), "missing 'id'");
    assert!(!v["content"].as_str().unwrap_or_default().is_empty(), "missing 'content'");
    assert!(!v["author"].as_str().unwrap_or_default().is_empty(), "missing 'author'");
    assert!(v["tags"].is_array(), "'tags' must be an array, never absent");
    assert_eq!(v["degraded"], Json::Bool(true), "no live sources configured");
}

#[tokio::test]
async fn api_quote_honors_tag_parameter() {
    let v = get_json(test_router(), "/api/quote?tag=wisdom").await;
    assert_eq!(v["degraded"], Json::Bool(true));
    assert_eq!(v["filter_relaxed"], Json::Bool(false));

    let haystack = format!(
        "{} {} {}",
        v["content"].as_str().unwrap_or_default(),
        v["author"].as_str().unwrap_or_default(),
        v["tags"].to_string()
    )
    .to_lowercase();
    assert!(haystack.contains("wisdom"), "quote should match the tag: {v}");
}

#[tokio::test]
async fn api_quote_surfaces_relaxed_filter() {
    let v = get_json(test_router(), "/api/quote?tag=zzz-no-match").await;
    assert_eq!(v["degraded"], Json::Bool(true));
    assert_eq!(v["filter_relaxed"], Json::Bool(true));
    assert!(!v["content"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn api_search_hit_and_no_matches_shapes() {
    let hit = get_json(test_router(), "/api/search?q=wisdom").await;
    assert_eq!(hit["no_matches"], Json::Bool(false));
    assert!(!hit["content"].as_str().unwrap_or_default().is_empty());

    let miss = get_json(test_router(), "/api/search?q=zzz-no-match").await;
    assert_eq!(miss["no_matches"], Json::Bool(true));
    assert!(miss.get("content").is_none(), "no quote fields on a miss");
}
