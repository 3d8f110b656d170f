//! Router assembly.

use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::api::chat::chat_completions;
use crate::state::AppState;

/// Build the application router.
///
/// `TraceLayer` gives per-request start/finish logging with method, path,
/// status, and latency.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/v1/chat/completions", post(chat_completions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root probe.
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "lmbridge is running"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}
