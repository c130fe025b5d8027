//! Prometheus exposition of upstream call metrics.

use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Duration;

const UPSTREAM_REQUESTS: &str = "docslug_upstream_requests_total";
const UPSTREAM_DURATION: &str = "docslug_upstream_request_duration_seconds";
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// The three upstream calls the gateway makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOperation {
    ListCategories,
    ListDocs,
    UpdateDoc,
}

impl UpstreamOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            UpstreamOperation::ListCategories => "list_categories",
            UpstreamOperation::ListDocs => "list_docs",
            UpstreamOperation::UpdateDoc => "update_doc",
        }
    }
}

/// How an upstream call ended, as a `status` label value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The upstream answered with this HTTP status.
    Status(u16),
    /// No HTTP answer: connect failure, timeout or similar.
    Transport,
}

impl CallOutcome {
    fn label(self) -> String {
        match self {
            CallOutcome::Status(status) => status.to_string(),
            CallOutcome::Transport => "transport_error".to_string(),
        }
    }
}

/// Handle to the installed recorder.
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

impl MetricsState {
    /// Install the process-wide Prometheus recorder. Fails if one is already
    /// installed.
    pub fn install() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {e}"))?;

        metrics::describe_counter!(
            UPSTREAM_REQUESTS,
            "Upstream calls by operation and status"
        );
        metrics::describe_histogram!(
            UPSTREAM_DURATION,
            "Upstream call latency in seconds, by operation"
        );
        Ok(Self { handle })
    }
}

/// Mount the exposition endpoint at `path`.
pub fn metrics_routes(path: &str, state: Arc<MetricsState>) -> Router {
    Router::new()
        .route(path, get(render))
        .with_state(state)
}

async fn render(State(state): State<Arc<MetricsState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        state.handle.render(),
    )
}

/// Record one upstream call. Does nothing while no recorder is installed.
pub fn record_upstream_call(operation: UpstreamOperation, outcome: CallOutcome, elapsed: Duration) {
    let operation = operation.as_str();
    metrics::increment_counter!(
        UPSTREAM_REQUESTS,
        "operation" => operation,
        "status" => outcome.label()
    );
    metrics::histogram!(UPSTREAM_DURATION, elapsed.as_secs_f64(), "operation" => operation);
}
