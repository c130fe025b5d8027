//! docslug gateway binary.

use docslug_gateway::{
    build_app,
    config::GatewayConfig,
    logging,
    proxy::UpstreamClient,
    routes::MetricsState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = match GatewayConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.server.host,
        port = config.server.port,
        upstream = %config.upstream.base_url,
        metrics_enabled = config.metrics.enabled,
        "Starting docslug gateway"
    );

    let upstream = match UpstreamClient::new(&config.upstream) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create upstream client: {e}");
            std::process::exit(1);
        }
    };

    let metrics = if config.metrics.enabled {
        match MetricsState::install() {
            Ok(state) => Some(Arc::new(state)),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let app = build_app(&config, Arc::new(upstream), metrics);

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
