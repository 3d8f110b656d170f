//! Response normalization.
//!
//! Reasoning models emit `<think>...</think>` blocks ahead of the answer.
//! When a request disables thinking, models frequently still emit an
//! *empty* block (`<think>\n\n</think>`), which clients render as noise.
//! Only those empty blocks are removed here; a block carrying actual
//! reasoning text passes through untouched, whether or not thinking was
//! requested. Suppressing non-empty traces is a different feature and
//! not what this does.

use std::sync::LazyLock;

use regex::Regex;

/// An opening delimiter, optional whitespace, a closing delimiter,
/// optional trailing whitespace.
static EMPTY_THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<think>\s*</think>\s*").expect("static pattern"));

/// Strip backend artifacts from generated text.
///
/// With `thinking_enabled`, the raw text is returned verbatim. Otherwise
/// empty thinking blocks are removed and the result is trimmed.
#[must_use]
pub fn normalize_completion(raw_text: &str, thinking_enabled: bool) -> String {
    if thinking_enabled {
        return raw_text.to_string();
    }
    EMPTY_THINK_BLOCK.replace_all(raw_text, "").trim().to_string()
}
