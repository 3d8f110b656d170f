//! Axum HTTP adapter for lmbridge.
//!
//! Exposes the OpenAI-compatible surface (`POST /v1/chat/completions`
//! plus root and health probes) over the core completion service. All
//! translation between the wire schema and the domain happens in [`api`];
//! wiring happens in the binary's composition root.

pub mod api;
pub mod config;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
