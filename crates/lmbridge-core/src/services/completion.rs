//! Chat-completion orchestration.
//!
//! [`CompletionService`] runs the whole pipeline for one request:
//! validate, select template, render prompt, call the backend, normalize,
//! account usage, assemble the response. Each step is pure except the
//! backend call; failures propagate unchanged and no partial response is
//! ever assembled.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{ChatCompletion, ChatMessage, CompletionRequest, MessageRole, Usage};
use crate::normalize::normalize_completion;
use crate::ports::{
    GenerationBackend, GenerationError, GenerationRequest, GenerationResult, TokenCounter,
};
use crate::template::PromptTemplate;

/// How token usage is computed for a response.
///
/// Two named strategies exist because backends differ: the Ollama-style
/// runtime reports `prompt_eval_count`/`eval_count` natively, while other
/// runtimes return text only and counts must be recomputed through the
/// model's tokenizer. The choice is made per backend integration at
/// construction time, never silently at request time.
#[derive(Debug, Clone)]
pub enum UsageStrategy {
    /// Trust the counts the backend reported (zero when absent).
    BackendReported,
    /// Recompute counts over the prompt and the normalized completion.
    LocalCount(Arc<dyn TokenCounter>),
}

/// Errors surfaced by [`CompletionService::complete`].
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Malformed or incomplete request; never retried.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Backend unreachable or timed out; the caller can retry later.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Backend reachable but rejected the call.
    #[error("Backend error {status}: {message}")]
    Backend { status: u16, message: String },

    /// Any other unexpected failure (e.g. malformed backend payload).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CompletionError {
    /// Returns a suggested HTTP status code for this error.
    #[must_use]
    pub const fn suggested_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::BackendUnavailable(_) => 503,
            Self::Backend { .. } => 502,
            Self::Internal(_) => 500,
        }
    }
}

impl From<GenerationError> for CompletionError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Unavailable(msg) => Self::BackendUnavailable(msg),
            GenerationError::Backend { status, message } => Self::Backend { status, message },
            GenerationError::Payload(msg) => Self::Internal(msg),
        }
    }
}

/// Orchestrates chat-completion requests against a generation backend.
///
/// Holds no per-request state; the backend handle is the only shared
/// resource and is safe for concurrent use.
#[derive(Debug)]
pub struct CompletionService {
    backend: Arc<dyn GenerationBackend>,
    usage: UsageStrategy,
}

impl CompletionService {
    /// Create a service over the given backend and usage strategy.
    #[must_use]
    pub fn new(backend: Arc<dyn GenerationBackend>, usage: UsageStrategy) -> Self {
        Self { backend, usage }
    }

    /// Run one chat-completion request end to end.
    ///
    /// # Errors
    ///
    /// - [`CompletionError::Validation`] for an empty `messages` list or
    ///   empty `model` identifier
    /// - [`CompletionError::BackendUnavailable`] / [`CompletionError::Backend`]
    ///   propagated from the backend call
    /// - [`CompletionError::Internal`] for malformed backend payloads
    pub async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<ChatCompletion, CompletionError> {
        validate(&request)?;

        let template = PromptTemplate::for_model(&request.model);
        let prompt = template.render(&request.messages);
        debug!(
            model = %request.model,
            template = ?template,
            prompt_chars = prompt.len(),
            "Rendered prompt"
        );

        let result = self
            .backend
            .generate(GenerationRequest {
                model: request.model.clone(),
                prompt: prompt.clone(),
                sampling: request.sampling,
                thinking: request.thinking,
            })
            .await?;

        let text = normalize_completion(&result.text, request.thinking);
        let usage = self.account_usage(&prompt, &text, &result);

        Ok(assemble(request.model, text, usage))
    }

    fn account_usage(&self, prompt: &str, completion: &str, result: &GenerationResult) -> Usage {
        match &self.usage {
            UsageStrategy::BackendReported => {
                Usage::from_counts(result.prompt_tokens, result.completion_tokens)
            }
            UsageStrategy::LocalCount(counter) => {
                Usage::from_counts(counter.count(prompt), counter.count(completion))
            }
        }
    }
}

fn validate(request: &CompletionRequest) -> Result<(), CompletionError> {
    if request.model.is_empty() {
        return Err(CompletionError::Validation("model must not be empty".into()));
    }
    if request.messages.is_empty() {
        return Err(CompletionError::Validation(
            "messages must contain at least one message".into(),
        ));
    }
    Ok(())
}

fn assemble(model: String, text: String, usage: Usage) -> ChatCompletion {
    ChatCompletion {
        id: fresh_id(),
        created: Utc::now().timestamp(),
        model,
        message: ChatMessage::new(MessageRole::Assistant, text),
        finish_reason: "stop".to_string(),
        usage,
    }
}

/// `chatcmpl-` plus a 10-hex-char random suffix.
fn fresh_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("chatcmpl-{}", &hex[..10])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SamplingOptions;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Mock backend that records calls and echoes a fixed payload.
    #[derive(Debug)]
    struct MockBackend {
        text: String,
        prompt_tokens: u32,
        completion_tokens: u32,
        calls: AtomicU32,
    }

    impl MockBackend {
        fn returning(text: &str, prompt_tokens: u32, completion_tokens: u32) -> Arc<Self> {
            Arc::new(Self {
                text: text.to_string(),
                prompt_tokens,
                completion_tokens,
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> Result<GenerationResult, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GenerationResult {
                text: self.text.clone(),
                prompt_tokens: self.prompt_tokens,
                completion_tokens: self.completion_tokens,
            })
        }
    }

    /// Backend that always fails with the given error.
    #[derive(Debug)]
    struct FailingBackend(fn() -> GenerationError);

    #[async_trait]
    impl GenerationBackend for FailingBackend {
        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> Result<GenerationResult, GenerationError> {
            Err((self.0)())
        }
    }

    /// Counter that charges one token per whitespace-separated word.
    #[derive(Debug)]
    struct WordCounter;

    impl TokenCounter for WordCounter {
        fn count(&self, text: &str) -> u32 {
            text.split_whitespace().count() as u32
        }
    }

    fn request(model: &str, content: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::new(MessageRole::User, content)],
            sampling: SamplingOptions::default(),
            thinking: false,
        }
    }

    #[tokio::test]
    async fn test_complete_happy_path() {
        let backend = MockBackend::returning("Hello there!", 12, 4);
        let service = CompletionService::new(backend.clone(), UsageStrategy::BackendReported);

        let completion = service.complete(request("qwen-test", "Hi")).await.unwrap();

        assert!(completion.id.starts_with("chatcmpl-"));
        assert_eq!(completion.model, "qwen-test");
        assert_eq!(completion.message.role, MessageRole::Assistant);
        assert_eq!(completion.message.content, "Hello there!");
        assert_eq!(completion.finish_reason, "stop");
        assert_eq!(completion.usage.prompt_tokens, 12);
        assert_eq!(completion.usage.completion_tokens, 4);
        assert_eq!(completion.usage.total_tokens, 16);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_messages_is_validation_error() {
        let backend = MockBackend::returning("unused", 0, 0);
        let service = CompletionService::new(backend.clone(), UsageStrategy::BackendReported);

        let mut req = request("qwen-test", "Hi");
        req.messages.clear();
        let err = service.complete(req).await.unwrap_err();

        assert!(matches!(err, CompletionError::Validation(_)));
        // Validation happens before the backend is touched.
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_model_is_validation_error() {
        let backend = MockBackend::returning("unused", 0, 0);
        let service = CompletionService::new(backend, UsageStrategy::BackendReported);

        let err = service.complete(request("", "Hi")).await.unwrap_err();
        assert!(matches!(err, CompletionError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_model_still_completes() {
        let backend = MockBackend::returning("fallback works", 1, 2);
        let service = CompletionService::new(backend, UsageStrategy::BackendReported);

        let completion = service
            .complete(request("unknown-model-x", "Hi"))
            .await
            .unwrap();
        assert_eq!(completion.message.content, "fallback works");
    }

    #[tokio::test]
    async fn test_empty_think_block_is_stripped() {
        let backend = MockBackend::returning("<think>\n\n</think>\nHello", 5, 5);
        let service = CompletionService::new(backend, UsageStrategy::BackendReported);

        let completion = service.complete(request("qwen-test", "Hi")).await.unwrap();
        assert_eq!(completion.message.content, "Hello");
    }

    #[tokio::test]
    async fn test_thinking_enabled_preserves_raw_text() {
        let backend = MockBackend::returning("<think>\n\n</think>\nHello", 5, 5);
        let service = CompletionService::new(backend, UsageStrategy::BackendReported);

        let mut req = request("qwen-test", "Hi");
        req.thinking = true;
        let completion = service.complete(req).await.unwrap();
        assert_eq!(completion.message.content, "<think>\n\n</think>\nHello");
    }

    #[tokio::test]
    async fn test_local_count_strategy_uses_tokenizer() {
        let backend = MockBackend::returning("three word answer", 999, 999);
        let service =
            CompletionService::new(backend, UsageStrategy::LocalCount(Arc::new(WordCounter)));

        let completion = service.complete(request("qwen-test", "Hi")).await.unwrap();

        // Backend-reported counts are ignored; the prompt renders to
        // "<|im_start|>user\nHi<|im_end|>\n<|im_start|>assistant\n" = 3 words.
        assert_eq!(completion.usage.prompt_tokens, 3);
        assert_eq!(completion.usage.completion_tokens, 3);
        assert_eq!(completion.usage.total_tokens, 6);
    }

    #[tokio::test]
    async fn test_backend_errors_propagate() {
        let unavailable = FailingBackend(|| GenerationError::Unavailable("refused".into()));
        let service =
            CompletionService::new(Arc::new(unavailable), UsageStrategy::BackendReported);
        let err = service.complete(request("qwen-test", "Hi")).await.unwrap_err();
        assert!(matches!(err, CompletionError::BackendUnavailable(_)));
        assert_eq!(err.suggested_status_code(), 503);

        let rejected = FailingBackend(|| GenerationError::Backend {
            status: 500,
            message: "boom".into(),
        });
        let service = CompletionService::new(Arc::new(rejected), UsageStrategy::BackendReported);
        let err = service.complete(request("qwen-test", "Hi")).await.unwrap_err();
        assert!(matches!(err, CompletionError::Backend { status: 500, .. }));
        assert_eq!(err.suggested_status_code(), 502);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let backend = MockBackend::returning("x", 1, 1);
        let service = CompletionService::new(backend, UsageStrategy::BackendReported);

        let a = service.complete(request("qwen-test", "Hi")).await.unwrap();
        let b = service.complete(request("qwen-test", "Hi")).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
