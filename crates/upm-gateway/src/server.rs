// SPDX-FileCopyrightText: 2026 UPM Exporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exporter HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the front end.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use upm_collector::UpmCollector;
use upm_core::ExporterError;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Collector driven once per scrape.
    pub collector: Arc<UpmCollector>,
    /// Renders the recorder's current contents in Prometheus text format.
    pub render: Arc<dyn Fn() -> String + Send + Sync>,
}

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the exporter router: liveness, favicon suppression, and the
/// scrape endpoint.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/favicon.ico", get(handlers::get_favicon))
        .route("/metrics", get(handlers::get_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the listener for the configured address.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ExporterError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::Server {
            message: format!("failed to bind exporter to {addr}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Serves requests on `listener` until `shutdown` is cancelled.
///
/// In-flight requests are allowed to complete after the token fires; an
/// in-progress collection cycle is never interrupted. Serve and shutdown
/// failures are fatal to the process.
pub async fn serve(
    listener: TcpListener,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), ExporterError> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| ExporterError::Server {
            message: format!("exporter server error: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Start the exporter HTTP server and run it to completion.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), ExporterError> {
    let listener = bind(config).await?;
    tracing::info!("exporter listening on {}:{}", config.host, config.port);
    serve(listener, state, shutdown).await
}
