//! Server entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together: the
//! Ollama backend client, the completion service, and the Axum router.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use lmbridge_core::{CompletionService, UsageStrategy};
use lmbridge_ollama::{OllamaClient, OllamaConfig};
use lmbridge_server::{AppState, ServerConfig, create_router};

/// OpenAI-compatible chat-completion server for a local inference runtime.
#[derive(Debug, Parser)]
#[command(name = "lmbridge-server", version, about)]
struct Cli {
    /// Host to bind the HTTP server to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the HTTP server.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Base URL of the inference runtime.
    #[arg(long, default_value = "http://127.0.0.1:11434")]
    backend_url: String,

    /// Per-call backend timeout in seconds.
    #[arg(long, default_value_t = 90)]
    timeout_secs: u64,

    /// Maximum generations in flight at once.
    #[arg(long, default_value_t = 30)]
    max_in_flight: usize,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            backend: OllamaConfig {
                base_url: self.backend_url,
                request_timeout: Duration::from_secs(self.timeout_secs),
                max_in_flight: self.max_in_flight,
                ..OllamaConfig::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Cli::parse().into_config();

    info!(
        backend_url = %config.backend.base_url,
        timeout_secs = config.backend.request_timeout.as_secs(),
        "Starting lmbridge"
    );

    // The backend session is created lazily on first request; nothing is
    // opened here.
    let backend = Arc::new(OllamaClient::new(config.backend.clone()));
    let completions = Arc::new(CompletionService::new(backend, UsageStrategy::BackendReported));

    let app = create_router(AppState::new(completions));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("lmbridge listening on http://{addr}");
    info!("OpenAI-compatible endpoint: http://{addr}/v1/chat/completions");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("lmbridge shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
