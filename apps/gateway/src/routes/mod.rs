//! Gateway routes.

pub mod docs;
pub mod health;
pub mod metrics;

pub use docs::{docs_routes, DocsState};
pub use health::{health_routes, HealthState};
pub use metrics::{metrics_routes, MetricsState};
