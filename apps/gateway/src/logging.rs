//! Structured logging setup using tracing.
//!
//! JSON output is the default, for log aggregation. `pretty` is meant for
//! local runs. `RUST_LOG`, when set, takes precedence over the configured
//! filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the global tracing subscriber.
///
/// Exits the process if the filter directive is invalid, mirroring the
/// fail-fast handling of the rest of the configuration.
pub fn init_logging(config: &LoggingConfig) {
    let filter_layer =
        match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level)) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("FATAL: Failed to create log filter: {e}");
                std::process::exit(1);
            }
        };

    let registry = tracing_subscriber::registry().with(filter_layer);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(true)
                    .with_line_number(true)
                    .flatten_event(true),
            )
            .init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }

    tracing::info!(filter = %config.level, format = ?config.format, "Logging initialized");
}
