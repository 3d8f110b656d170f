//! Ollama backend adapter for lmbridge.
//!
//! Implements the core [`GenerationBackend`](lmbridge_core::GenerationBackend)
//! port against an Ollama-style inference runtime: a local HTTP service
//! accepting `{model, prompt, stream: false, options}` on `/api/generate`
//! and answering `{response, done, prompt_eval_count, eval_count, ...}`.

pub mod client;
pub mod wire;

pub use client::{OllamaClient, OllamaConfig};
