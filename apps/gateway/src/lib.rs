//! docslug gateway
//!
//! Credential-translating proxy in front of the ReadMe docs API. Callers
//! authenticate with an `x-api-key` header; the gateway turns it into the
//! upstream Basic `Authorization` header and relays each call one to one.

pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod proxy;
pub mod routes;

use axum::{
    http::{HeaderName, HeaderValue, Method},
    Router,
};
use docslug_core::DocsApi;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use config::{CorsConfig, GatewayConfig};
use middleware::PreflightLayer;
use routes::{docs_routes, health_routes, metrics_routes, DocsState, HealthState, MetricsState};

/// Assemble the gateway router.
///
/// `api` performs the upstream calls; `metrics` mounts the Prometheus
/// endpoint when present.
pub fn build_app(
    config: &GatewayConfig,
    api: Arc<dyn DocsApi>,
    metrics: Option<Arc<MetricsState>>,
) -> Router {
    let mut app = Router::new()
        .merge(docs_routes(DocsState::new(api)))
        .merge(health_routes(Arc::new(HealthState::new(
            config.upstream.base_url.clone(),
        ))));

    if let Some(metrics) = metrics {
        app = app.merge(metrics_routes(&config.metrics.path, metrics));
    }

    app.layer(PreflightLayer)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(build_cors_layer(&config.cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Build the CORS layer from configuration. A lone `*` allows any origin.
pub fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let is_wildcard = cors.allowed_origins.iter().any(|o| o == "*");

    let allow_origin = if is_wildcard {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let headers: Vec<HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|h| h.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .max_age(Duration::from_secs(cors.max_age_secs))
}
