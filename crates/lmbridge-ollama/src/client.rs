//! HTTP client for the Ollama inference runtime.
//!
//! One [`OllamaClient`] is shared process-wide. It owns a single reusable
//! `reqwest::Client` session (connection pool, TLS state) that is created
//! lazily on first use and replaced, never mutated in place, after a
//! connect failure. Creation is a guarded check-and-set so two requests
//! racing on a cold client cannot double-initialize it.
//!
//! Concurrency discipline: the session itself is safe for any number of
//! in-flight calls; a semaphore bounds how many generations run at once
//! so a burst of requests cannot fan out unboundedly against the runtime.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, error, warn};

use lmbridge_core::{GenerationBackend, GenerationError, GenerationRequest, GenerationResult};

use crate::wire::{GenerateOptions, GenerateRequest, GenerateResponse};

/// Configuration for the Ollama backend connection.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the runtime (e.g. `http://127.0.0.1:11434`).
    pub base_url: String,
    /// Per-call timeout; a timeout surfaces as `BackendUnavailable`.
    pub request_timeout: Duration,
    /// Maximum generations in flight at once.
    pub max_in_flight: usize,
    /// Idle connections kept pooled per host.
    pub max_idle_per_host: usize,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            request_timeout: Duration::from_secs(90),
            max_in_flight: 30,
            max_idle_per_host: 10,
        }
    }
}

/// Backend client for an Ollama-style inference runtime.
#[derive(Debug)]
pub struct OllamaClient {
    config: OllamaConfig,
    /// Lazily created shared session; `None` until first use or after a
    /// connect failure invalidated it.
    session: RwLock<Option<Client>>,
    permits: Semaphore,
}

impl OllamaClient {
    /// Create a client; no connection is opened until the first call.
    #[must_use]
    pub fn new(config: OllamaConfig) -> Self {
        let permits = Semaphore::new(config.max_in_flight);
        Self {
            config,
            session: RwLock::new(None),
            permits,
        }
    }

    /// Get the shared session, creating it if absent.
    ///
    /// Fast path is a read lock; on a cold client the write lock is taken
    /// and re-checked, so a racing task that lost the write race reuses
    /// the winner's session instead of overwriting it.
    async fn session(&self) -> Result<Client, GenerationError> {
        if let Some(client) = self.session.read().await.as_ref() {
            return Ok(client.clone());
        }

        let mut guard = self.session.write().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        debug!(base_url = %self.config.base_url, "Creating backend session");
        let client = Client::builder()
            .timeout(self.config.request_timeout)
            .pool_max_idle_per_host(self.config.max_idle_per_host)
            .build()
            .map_err(|e| {
                GenerationError::Unavailable(format!("failed to create backend session: {e}"))
            })?;
        *guard = Some(client.clone());
        Ok(client)
    }

    /// Drop the pooled session so the next call rebuilds it.
    async fn invalidate_session(&self) {
        warn!("Invalidating backend session after connect failure");
        self.session.write().await.take();
    }
}

#[async_trait]
impl GenerationBackend for OllamaClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| GenerationError::Unavailable("backend client shut down".into()))?;

        let client = self.session().await?;
        let url = format!("{}/api/generate", self.config.base_url);

        let body = GenerateRequest {
            model: request.model,
            prompt: request.prompt,
            stream: false,
            options: GenerateOptions::from(request.sampling),
        };

        debug!(url = %url, model = %body.model, "Calling inference runtime");

        let response = match client.post(&url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                if e.is_connect() {
                    self.invalidate_session().await;
                }
                error!("Failed to reach inference runtime: {e}");
                return Err(GenerationError::Unavailable(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Inference runtime returned {status}: {message}");
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Payload(e.to_string()))?;

        Ok(GenerationResult {
            text: payload.response,
            prompt_tokens: payload.prompt_eval_count,
            completion_tokens: payload.eval_count,
        })
    }
}
