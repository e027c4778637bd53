//! HTTP surface: `POST /upload` profiles an uploaded file or a database table,
//! `GET /health` answers liveness probes.
//!
//! [`build_app`] assembles the router from an [`AppState`]; the binary only adds a listener.

pub mod config;
pub mod error;
pub mod form;
pub mod routes;
pub mod storage;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::ingestion::{IngestionOptions, IngestionSeverity, TracingObserver};

pub use config::ServerConfig;
pub use error::AppError;

/// Shared, immutable per-process state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Upload directory and body limit.
    pub config: Arc<ServerConfig>,
    /// Base options for every ingestion; handlers clone and adjust them per request.
    pub ingestion: IngestionOptions,
}

impl AppState {
    /// State that reports ingestion outcomes through `tracing`.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            ingestion: IngestionOptions {
                observer: Some(Arc::new(TracingObserver)),
                alert_at_or_above: IngestionSeverity::Critical,
                ..IngestionOptions::default()
            },
        }
    }
}

/// The application router with body limit and request tracing applied.
pub fn build_app(state: AppState) -> Router {
    let body_limit = match state.config.max_upload_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/upload", post(routes::upload))
        .route("/health", get(routes::health))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
