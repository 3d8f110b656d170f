//! OpenAI API data models for request/response handling.
//!
//! These types match the OpenAI API specification on the wire. Domain
//! types live in `lmbridge-core`; this module handles the API-layer
//! mapping, including the request-field aliases some clients send
//! (`num_predict` for `max_tokens`, `repetition_penalty` for
//! `repeat_penalty`) and the single point where missing sampling fields
//! are resolved against their defaults.

use serde::{Deserialize, Serialize};

use lmbridge_core::{ChatCompletion, ChatMessage, CompletionRequest, SamplingOptions, Usage};

/// Request to the `/v1/chat/completions` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name to use; also selects the prompt template.
    pub model: String,
    /// Ordered array of chat messages.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate (`num_predict` in Ollama clients).
    #[serde(alias = "num_predict")]
    pub max_tokens: Option<u32>,
    /// Top-p sampling parameter.
    pub top_p: Option<f32>,
    /// Top-K sampling parameter (non-standard OpenAI field).
    pub top_k: Option<i32>,
    /// Repetition penalty (`repetition_penalty` in some clients).
    #[serde(alias = "repetition_penalty")]
    pub repeat_penalty: Option<f32>,
    /// Whether to keep thinking markup in the output verbatim.
    #[serde(default)]
    pub thinking: bool,
    /// Streaming is not supported; a `true` here is rejected up front.
    #[serde(default)]
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Convert into the domain request, resolving every missing sampling
    /// field against its documented default exactly once.
    #[must_use]
    pub fn into_domain(self) -> CompletionRequest {
        let defaults = SamplingOptions::default();
        CompletionRequest {
            model: self.model,
            messages: self.messages,
            sampling: SamplingOptions {
                temperature: self.temperature.unwrap_or(defaults.temperature),
                top_p: self.top_p.unwrap_or(defaults.top_p),
                top_k: self.top_k.unwrap_or(defaults.top_k),
                max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
                repeat_penalty: self.repeat_penalty.unwrap_or(defaults.repeat_penalty),
            },
            thinking: self.thinking,
        }
    }
}

/// Response from the `/v1/chat/completions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

/// A single chat completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

impl From<ChatCompletion> for ChatCompletionResponse {
    fn from(completion: ChatCompletion) -> Self {
        Self {
            id: completion.id,
            object: "chat.completion".to_string(),
            created: completion.created,
            model: completion.model,
            choices: vec![ChatChoice {
                index: 0,
                message: completion.message,
                finish_reason: completion.finish_reason,
            }],
            usage: completion.usage,
        }
    }
}

/// Error response matching the OpenAI format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail within an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    #[must_use]
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                r#type: error_type.into(),
                code: None,
            },
        }
    }

    /// Create an error response with a code.
    #[must_use]
    pub fn with_code(
        message: impl Into<String>,
        error_type: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                r#type: error_type.into(),
                code: Some(code.into()),
            },
        }
    }
}
