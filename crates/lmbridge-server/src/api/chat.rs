//! Chat completion handler.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::{debug, info};

use crate::state::AppState;

use super::error::{completion_error_response, invalid_body_response};
use super::models::{ChatCompletionRequest, ChatCompletionResponse};

/// Handle `POST /v1/chat/completions`.
///
/// The body is parsed manually (rather than via the `Json` extractor) so
/// malformed JSON maps to a 400 in the OpenAI error shape instead of the
/// framework's default rejection.
pub async fn chat_completions(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("POST /v1/chat/completions");

    let request: ChatCompletionRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            debug!("Failed to parse request: {e}");
            return invalid_body_response(&e.to_string());
        }
    };

    if request.stream {
        return invalid_body_response("streaming responses are not supported");
    }

    info!(
        model = %request.model,
        messages = request.messages.len(),
        thinking = request.thinking,
        "Processing chat completion request"
    );

    match state.completions.complete(request.into_domain()).await {
        Ok(completion) => Json(ChatCompletionResponse::from(completion)).into_response(),
        Err(e) => completion_error_response(&e),
    }
}
