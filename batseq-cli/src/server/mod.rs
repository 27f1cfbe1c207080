//! HTTP API for the BatGIS web client

pub mod handlers;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use batseq_tools::SequenceSearchService;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
pub type AppState = Arc<SequenceSearchService>;

pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/api/blastn", post(handlers::blastn))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        // The web client is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(service)
}

pub async fn serve(service: AppState, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    let addr = listener.local_addr()?;

    tracing::info!("Listening on http://{}", addr);
    crate::cli::output::info(&format!("BatSEQ API listening on http://{}", addr));

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
