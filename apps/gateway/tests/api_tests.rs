//! Integration tests for the `/api` routes.
//!
//! A wiremock server stands in for the ReadMe API; requests go through the
//! full gateway router with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use docslug_gateway::{build_app, config::GatewayConfig, proxy::UpstreamClient};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("test-key:")
const EXPECTED_AUTH: &str = "Basic dGVzdC1rZXk6";

// =============================================================================
// Test Helpers
// =============================================================================

fn config_for(upstream_url: &str, upstream_timeout_secs: u64) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.base_url = upstream_url.to_string();
    config.upstream.timeout_secs = upstream_timeout_secs;
    config
}

fn app_with(config: &GatewayConfig) -> Router {
    let upstream = UpstreamClient::new(&config.upstream).unwrap();
    build_app(config, Arc::new(upstream), None)
}

fn app_for(upstream_url: &str) -> Router {
    app_with(&config_for(upstream_url, 5))
}

async fn app(server: &MockServer) -> Router {
    app_for(&format!("{}/api/v1", server.uri()))
}

fn get(uri: &str, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).unwrap()
}

fn put(uri: &str, api_key: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Fail the test if the upstream receives anything at all.
async fn expect_no_upstream_calls(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

// =============================================================================
// GET /api/categories
// =============================================================================

#[tokio::test]
async fn test_categories_are_filtered_to_guides() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .and(header("Authorization", EXPECTED_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"slug": "getting-started", "title": "Getting Started", "type": "guide", "order": 0},
            {"slug": "endpoints", "title": "Endpoints", "type": "reference"},
            {"slug": "tutorials", "title": "Tutorials", "type": "guide"},
            {"slug": "internal", "title": "Internal", "type": "changelog"},
            {"slug": "legacy", "title": null, "type": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .await
        .oneshot(get("/api/categories", Some("test-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert!(categories.iter().all(|c| c["type"] == "guide"));
    assert_eq!(categories[0]["slug"], "getting-started");
    assert_eq!(categories[0]["order"], 0);
    assert_eq!(categories[1]["slug"], "tutorials");
}

#[tokio::test]
async fn test_categories_upstream_status_passthrough() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "APIKEY_NOTFOUND"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .await
        .oneshot(get("/api/categories", Some("wrong-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_categories_undecodable_body_is_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let response = app(&server)
        .await
        .oneshot(get("/api/categories", Some("test-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "TRANSPORT_ERROR");
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    // Nothing listens on the discard port.
    let response = app_for("http://127.0.0.1:9/api/v1")
        .oneshot(get("/api/categories", Some("test-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "TRANSPORT_ERROR");
    assert!(body["message"].as_str().unwrap().starts_with("Transport error"));
}

#[tokio::test]
async fn test_hung_upstream_is_transport_error_with_default_server_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    // Server timeout stays at its default; only the upstream one is short.
    let config = config_for(&format!("{}/api/v1", server.uri()), 1);
    assert!(config.validate().is_ok());

    let response = app_with(&config)
        .oneshot(get("/api/categories", Some("test-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let body = json_body(response).await;
    assert_eq!(body["error"], "TRANSPORT_ERROR");
    assert_eq!(body["message"], "Transport error: Upstream request timed out");
}

// =============================================================================
// GET /api/categories/{slug}/docs
// =============================================================================

#[tokio::test]
async fn test_docs_are_relayed_verbatim() {
    let server = MockServer::start().await;

    let docs = json!([
        {"slug": "install", "title": "Install", "_id": "61a", "hidden": false},
        {"slug": "configure", "title": "Configure", "_id": "61b", "hidden": true}
    ]);

    Mock::given(method("GET"))
        .and(path("/api/v1/categories/getting-started/docs"))
        .and(header("Authorization", EXPECTED_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .await
        .oneshot(get("/api/categories/getting-started/docs", Some("test-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, docs);
}

#[tokio::test]
async fn test_unknown_category_passes_not_found_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/categories/nope/docs"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "CATEGORY_NOTFOUND"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .await
        .oneshot(get("/api/categories/nope/docs", Some("test-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// PUT /api/docs/{slug}
// =============================================================================

#[tokio::test]
async fn test_update_forwards_new_slug() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/docs/install"))
        .and(header("Authorization", EXPECTED_AUTH))
        .and(body_json(json!({"slug": "installation"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"slug": "installation", "title": "Install", "_id": "61a"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .await
        .oneshot(put(
            "/api/docs/install",
            Some("test-key"),
            r#"{"slug": "installation"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["slug"], "installation");
    assert_eq!(body["_id"], "61a");
}

#[tokio::test]
async fn test_update_missing_slug_is_bad_request() {
    let server = MockServer::start().await;
    expect_no_upstream_calls(&server).await;

    for body in [r#"{}"#, r#"{"slug": ""}"#, r#"{"slug": null}"#, "", "not json"] {
        let response = app(&server)
            .await
            .oneshot(put("/api/docs/install", Some("test-key"), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body:?}");
        let json = json_body(response).await;
        assert_eq!(json["error"], "MISSING_SLUG");
    }
}

#[tokio::test]
async fn test_update_upstream_conflict_passthrough() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/docs/install"))
        .respond_with(ResponseTemplate::new(409))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .await
        .oneshot(put(
            "/api/docs/install",
            Some("test-key"),
            r#"{"slug": "taken"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// =============================================================================
// Missing API key
// =============================================================================

#[tokio::test]
async fn test_missing_api_key_never_reaches_upstream() {
    let server = MockServer::start().await;
    expect_no_upstream_calls(&server).await;

    let requests = [
        get("/api/categories", None),
        get("/api/categories/getting-started/docs", None),
        put("/api/docs/install", None, r#"{"slug": "installation"}"#),
        get("/api/categories", Some("")),
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let response = app(&server).await.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let body = json_body(response).await;
        assert_eq!(body["error"], "MISSING_API_KEY");
        assert_eq!(body["message"], "Missing API key");
    }
}

#[tokio::test]
async fn test_missing_key_reported_before_missing_slug() {
    let server = MockServer::start().await;
    expect_no_upstream_calls(&server).await;

    let response = app(&server)
        .await
        .oneshot(put("/api/docs/install", None, "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "MISSING_API_KEY");
}

// =============================================================================
// Ambient routes
// =============================================================================

#[tokio::test]
async fn test_health_reports_upstream() {
    let server = MockServer::start().await;

    let response = app(&server)
        .await
        .oneshot(get("/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["upstream"], format!("{}/api/v1", server.uri()));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = MockServer::start().await;

    let response = app(&server)
        .await
        .oneshot(get("/health", None))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
