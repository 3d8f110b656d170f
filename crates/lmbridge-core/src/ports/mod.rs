//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//! No reqwest types appear in any signature.

pub mod generation;
pub mod token_counter;

pub use generation::{GenerationBackend, GenerationError, GenerationRequest, GenerationResult};
pub use token_counter::TokenCounter;
