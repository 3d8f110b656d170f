//! Generation backend port.
//!
//! This port is the boundary to the external inference runtime. The core
//! hands it a rendered prompt plus sampling parameters and gets back the
//! generated text with whatever token counts the runtime reports.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::SamplingOptions;

/// One generation call to the inference runtime.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Model identifier as the runtime knows it.
    pub model: String,
    /// Fully rendered prompt text.
    pub prompt: String,
    /// Resolved sampling parameters.
    pub sampling: SamplingOptions,
    /// Threaded through unchanged from the inbound request; consumed by
    /// the normalizer, not by the wire protocol.
    pub thinking: bool,
}

/// Raw result of one generation call.
///
/// Token counts are zero when the runtime's payload omits them; the
/// usage strategy decides whether to trust or recompute them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Errors from the generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Connection refused, timeout, or session-establishment failure.
    /// Callers may retry later; the backend was never reached (or never
    /// answered), so nothing was generated.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Backend reachable but returned a non-success status.
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// Backend answered 200 with a payload we could not interpret.
    #[error("Malformed backend payload: {0}")]
    Payload(String),
}

/// Port to the external inference runtime.
///
/// Implementations own the channel to the runtime (one persistent session
/// reused across calls) and must be safe for concurrent use by many
/// in-flight requests.
#[async_trait]
pub trait GenerationBackend: Send + Sync + fmt::Debug {
    /// Run one generation call.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the runtime is unreachable, times
    /// out, rejects the call, or answers with a malformed payload.
    async fn generate(&self, request: GenerationRequest)
    -> Result<GenerationResult, GenerationError>;
}
