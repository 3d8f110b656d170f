//! Token counter port.

/// Counts tokens the way the served model's tokenizer would.
///
/// Only needed by backend integrations that do not report token counts
/// natively; see [`crate::services::UsageStrategy::LocalCount`].
pub trait TokenCounter: Send + Sync + std::fmt::Debug {
    /// Number of tokens in `text` under the model's encoding.
    fn count(&self, text: &str) -> u32;
}
