//! Error-to-HTTP mapping.
//!
//! Every pipeline failure is mapped exactly once, here, into the OpenAI
//! error shape. Internal errors are logged with full context server-side
//! and sanitized for the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use lmbridge_core::CompletionError;

use super::models::ErrorResponse;

/// Map a completion error to its HTTP response.
pub fn completion_error_response(err: &CompletionError) -> Response {
    let status = StatusCode::from_u16(err.suggested_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        CompletionError::Validation(msg) => ErrorResponse::new(msg, "invalid_request_error"),
        CompletionError::BackendUnavailable(msg) => ErrorResponse::with_code(
            format!("Inference backend unavailable: {msg}"),
            "service_unavailable",
            "backend_unavailable",
        ),
        CompletionError::Backend { status, message } => ErrorResponse::with_code(
            format!("Inference backend returned {status}: {message}"),
            "server_error",
            "upstream_error",
        ),
        CompletionError::Internal(msg) => {
            error!("Internal error while completing request: {msg}");
            ErrorResponse::new("Internal server error", "server_error")
        }
    };

    (status, Json(body)).into_response()
}

/// 400 for a request body that does not parse as the OpenAI schema.
pub fn invalid_body_response(detail: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(
            format!("Invalid request body: {detail}"),
            "invalid_request_error",
        )),
    )
        .into_response()
}
