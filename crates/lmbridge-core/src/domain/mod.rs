//! Core domain types.
//!
//! These types represent the pure domain model of a chat-completion
//! request, independent of any infrastructure concerns (HTTP framework,
//! backend wire format).
//!
//! # Structure
//!
//! - `chat` - Message roles and chat messages
//! - `sampling` - Sampling parameters and their defaults
//! - `completion` - Request/response aggregates and usage accounting

pub mod chat;
pub mod completion;
pub mod sampling;

// Re-export at the domain level for convenience
pub use chat::{ChatMessage, MessageRole};
pub use completion::{ChatCompletion, CompletionRequest, Usage};
pub use sampling::SamplingOptions;
