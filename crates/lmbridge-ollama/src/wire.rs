//! Wire types for the Ollama `/api/generate` boundary.
//!
//! Request fields follow Ollama's native (non-OpenAI) generate API.
//! Response parsing is lenient: any count the runtime omits defaults to
//! zero rather than failing the call. Only the generated text itself is
//! required.

use serde::{Deserialize, Serialize};

use lmbridge_core::SamplingOptions;

/// Body POSTed to `/api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always false; streaming is not part of this gateway's contract.
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Sampling options in Ollama's naming (`num_predict`, not `max_tokens`).
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub num_predict: u32,
    pub repeat_penalty: f32,
}

impl From<SamplingOptions> for GenerateOptions {
    fn from(sampling: SamplingOptions) -> Self {
        Self {
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            top_k: sampling.top_k,
            num_predict: sampling.max_tokens,
            repeat_penalty: sampling.repeat_penalty,
        }
    }
}

/// Body returned by `/api/generate` (non-streaming).
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub prompt_eval_count: u32,
    #[serde(default)]
    pub eval_count: u32,
}
