//! OpenAI-compatible API layer: DTOs, error mapping, and handlers.

pub mod chat;
pub mod error;
pub mod models;
