//! Core domain types and port definitions for lmbridge.
//!
//! This crate holds everything the HTTP adapter and backend adapters share:
//! the chat domain model, the prompt template registry, the response
//! normalizer, usage accounting, and the [`CompletionService`] that
//! orchestrates a single chat-completion request. It knows nothing about
//! axum or reqwest; backends plug in through the ports in [`ports`].

pub mod domain;
pub mod normalize;
pub mod ports;
pub mod services;
pub mod template;

// Re-export commonly used types for convenience
pub use domain::{ChatCompletion, ChatMessage, CompletionRequest, MessageRole, SamplingOptions, Usage};
pub use normalize::normalize_completion;
pub use ports::{
    GenerationBackend, GenerationError, GenerationRequest, GenerationResult, TokenCounter,
};
pub use services::{CompletionError, CompletionService, UsageStrategy};
pub use template::PromptTemplate;
