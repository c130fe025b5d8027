//! Liveness endpoint.
//!
//! The upstream is not contacted: every upstream call needs a caller's key,
//! and the gateway holds none of its own.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Application state for health checks.
#[derive(Debug, Clone)]
pub struct HealthState {
    pub start_time: Instant,
    pub version: String,
    pub upstream: String,
}

impl HealthState {
    pub fn new(upstream: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            upstream: upstream.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_secs: u64,
    pub upstream: String,
}

/// Overall health status.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Create health check routes.
pub fn health_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: state.version.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        upstream: state.upstream.clone(),
    })
}
