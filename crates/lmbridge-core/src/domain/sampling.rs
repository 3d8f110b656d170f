//! Sampling parameter types.
//!
//! Defines the full set of generation parameters a request may carry.
//! Every option and its default is enumerated explicitly here; the HTTP
//! boundary resolves missing fields against these defaults exactly once,
//! so the rest of the pipeline never sees an `Option`.

use serde::{Deserialize, Serialize};

/// Sampling parameters for a single generation call.
///
/// Defaults favor deterministic output: greedy temperature, full nucleus,
/// a short completion budget. They mirror what the inference runtime is
/// asked for when a client sends nothing beyond `model` and `messages`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Sampling temperature (0.0 = greedy).
    pub temperature: f32,
    /// Nucleus sampling threshold (0.0 - 1.0).
    pub top_p: f32,
    /// Top-K sampling limit.
    pub top_k: i32,
    /// Maximum tokens to generate in the completion.
    pub max_tokens: u32,
    /// Repetition penalty (0.0 = backend default behavior).
    pub repeat_penalty: f32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            top_p: 1.0,
            top_k: 20,
            max_tokens: 100,
            repeat_penalty: 0.0,
        }
    }
}
