//! Completion request/response aggregates and usage accounting.

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;
use super::sampling::SamplingOptions;

/// A validated chat-completion request.
///
/// Invariants (`messages` non-empty, `model` non-empty) are checked by
/// the completion service, not by the types themselves; the HTTP
/// boundary constructs this directly from the wire request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier; also selects the prompt template.
    pub model: String,
    /// Ordered conversation history.
    pub messages: Vec<ChatMessage>,
    /// Fully resolved sampling parameters.
    pub sampling: SamplingOptions,
    /// When false, empty thinking blocks are stripped from the output.
    pub thinking: bool,
}

/// Token usage for one completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    /// Build usage from the two component counts.
    ///
    /// `total_tokens` is always the sum; there is no constructor that
    /// accepts an independent total.
    #[must_use]
    pub const fn from_counts(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// A completed chat response, one choice, ready to serialize at the edge.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    /// Unique response id (`chatcmpl-` + random suffix).
    pub id: String,
    /// Unix timestamp of response assembly.
    pub created: i64,
    /// Echo of the requested model identifier.
    pub model: String,
    /// The assistant message produced by the backend.
    pub message: ChatMessage,
    /// Why generation stopped; always `"stop"` in this design.
    pub finish_reason: String,
    pub usage: Usage,
}
