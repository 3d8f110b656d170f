//! Shared application state for the HTTP server.

use std::sync::Arc;

use lmbridge_core::CompletionService;

/// Shared state — cloneable, injected via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    /// Completion pipeline over the configured backend.
    pub completions: Arc<CompletionService>,
}

impl AppState {
    #[must_use]
    pub fn new(completions: Arc<CompletionService>) -> Self {
        Self { completions }
    }
}
