//! HTTP API server.
//!
//! Provides two endpoints:
//! - `/api/dns` - concurrent multi-record lookup for one domain
//! - `/api/health` - liveness probe
//!
//! Errors are returned as `{"error", "message", "invalidTypes"?, "debug"?}`
//! with the status mapped from the error's severity.

mod handlers;
mod types;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use handlers::{dns_handler, health_handler};
pub use types::{AppState, HealthResponse};

/// Builds the API router.
///
/// When `cors_origin` is set, browsers served from that origin may call the
/// API with `GET`.
pub fn build_router(state: AppState, cors_origin: Option<HeaderValue>) -> Router {
    let router = Router::new()
        .route("/api/dns", get(dns_handler))
        .route("/api/health", get(health_handler))
        .with_state(state);

    match cors_origin {
        Some(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET]),
        ),
        None => router,
    }
}

/// Binds the configured address and serves until Ctrl+C.
pub async fn start_server(config: &Config, state: AppState) -> Result<(), anyhow::Error> {
    let cors_origin = config
        .frontend_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("Invalid frontend origin")?;
    let app = build_router(state, cors_origin);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}/", addr);
    log::info!("  - DNS lookup: http://{}/api/dns?domain=example.com", addr);
    log::info!("  - Health: http://{}/api/health", addr);
    if let Some(origin) = &config.frontend_origin {
        log::info!("  - CORS enabled for {}", origin);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received, draining connections");
}
