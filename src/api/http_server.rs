// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::classify::{classify_handler, history_handler, results_handler};
use super::upload::{upload_handler, upload_status_handler};
use crate::classifier::UnifiedClassifier;
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<UnifiedClassifier>,
}

/// Build the service router.
pub fn build_router(classifier: Arc<UnifiedClassifier>) -> Router {
    let state = AppState { classifier };

    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Upload endpoints (validation gate only)
        .route("/api/upload", post(upload_handler))
        .route("/api/upload/status", get(upload_status_handler))
        // Classification endpoints
        .route("/api/classification/classify", post(classify_handler))
        .route("/api/classification/results/:image_id", get(results_handler))
        .route("/api/classification/history", get(history_handler))
        // Leave room above the 10 MiB cap so oversized uploads reach the
        // validation gate and get its error message instead of a 413.
        .layer(DefaultBodyLimit::max(2 * crate::validation::MAX_UPLOAD_SIZE))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn start_server(
    config: &ServerConfig,
    classifier: Arc<UnifiedClassifier>,
) -> anyhow::Result<()> {
    let app = build_router(classifier);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Road sign classification API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    axum::response::Json(json!({ "status": "ok" }))
}
