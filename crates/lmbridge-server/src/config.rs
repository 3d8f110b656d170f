//! Server configuration.

use std::time::Duration;

use lmbridge_ollama::OllamaConfig;

/// Configuration for the HTTP server and its backend connection.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Backend connection settings.
    pub backend: OllamaConfig,
}

impl ServerConfig {
    /// Create config with default values: localhost:8000 in front of an
    /// Ollama runtime on its standard port.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            backend: OllamaConfig::default(),
        }
    }

    /// Set the backend base URL.
    #[must_use]
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend.base_url = url.into();
        self
    }

    /// Set the per-call backend timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.backend.request_timeout = timeout;
        self
    }

    /// Address string for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
