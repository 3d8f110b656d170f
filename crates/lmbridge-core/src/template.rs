//! Prompt template registry and renderers.
//!
//! A template converts an ordered conversation into the exact text prompt
//! a model family expects, including its role-delimiter syntax. Templates
//! form a closed set: one enum variant per family, each paired with a pure
//! rendering function, selected by case-insensitive prefix match on the
//! model identifier.
//!
//! Selection never fails. An unrecognized model name falls back to
//! [`PromptTemplate::DEFAULT`]; that is the documented policy, not an
//! error path.

use crate::domain::ChatMessage;

/// Known model families, keyed by identifier prefix (lowercase).
const FAMILIES: &[(&str, PromptTemplate)] = &[("qwen", PromptTemplate::ChatMl)];

/// A prompt-rendering strategy for a model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// ChatML role blocks (`<|im_start|>role ... <|im_end|>`), used by the
    /// Qwen family.
    ChatMl,
}

impl PromptTemplate {
    /// Template used when the model identifier matches no known family.
    pub const DEFAULT: Self = Self::ChatMl;

    /// Select the template for a model identifier.
    ///
    /// Matching is a case-insensitive prefix test against the family
    /// table, so `"Qwen2.5-7B"`, `"qwen3:14b"`, and `"QWEN-test"` all
    /// resolve to the Qwen template.
    #[must_use]
    pub fn for_model(model: &str) -> Self {
        let lower = model.to_lowercase();
        FAMILIES
            .iter()
            .find(|(prefix, _)| lower.starts_with(prefix))
            .map_or(Self::DEFAULT, |(_, template)| *template)
    }

    /// Render a conversation into a single prompt string.
    ///
    /// Deterministic and pure: messages are emitted in order, none are
    /// truncated, reordered, or deduplicated. The rendered prompt ends
    /// with an open assistant block so the model continues from there.
    /// Callers validate that `messages` is non-empty before rendering.
    #[must_use]
    pub fn render(&self, messages: &[ChatMessage]) -> String {
        match self {
            Self::ChatMl => render_chatml(messages),
        }
    }
}

fn render_chatml(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str("<|im_start|>");
        prompt.push_str(message.role.as_str());
        prompt.push('\n');
        prompt.push_str(&message.content);
        prompt.push_str("<|im_end|>\n");
    }
    prompt.push_str("<|im_start|>assistant\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;

    fn msg(role: MessageRole, content: &str) -> ChatMessage {
        ChatMessage::new(role, content)
    }

    #[test]
    fn test_select_known_family_case_insensitive() {
        assert_eq!(PromptTemplate::for_model("qwen2.5-7b"), PromptTemplate::ChatMl);
        assert_eq!(PromptTemplate::for_model("Qwen3:14b"), PromptTemplate::ChatMl);
        assert_eq!(PromptTemplate::for_model("QWEN-test"), PromptTemplate::ChatMl);
    }

    #[test]
    fn test_select_unknown_falls_back_to_default() {
        assert_eq!(
            PromptTemplate::for_model("unknown-model-x"),
            PromptTemplate::DEFAULT
        );
        assert_eq!(PromptTemplate::for_model(""), PromptTemplate::DEFAULT);
    }

    #[test]
    fn test_render_single_user_message() {
        let prompt = PromptTemplate::ChatMl.render(&[msg(MessageRole::User, "Hi")]);
        assert_eq!(prompt, "<|im_start|>user\nHi<|im_end|>\n<|im_start|>assistant\n");
    }

    #[test]
    fn test_render_preserves_order_and_roles() {
        let messages = vec![
            msg(MessageRole::System, "You are helpful."),
            msg(MessageRole::User, "What is Rust?"),
            msg(MessageRole::Assistant, "A systems language."),
            msg(MessageRole::User, "Tell me more."),
        ];
        let prompt = PromptTemplate::ChatMl.render(&messages);

        // Every message appears, in order, with its role delimiter.
        let mut cursor = 0;
        for message in &messages {
            let block = format!(
                "<|im_start|>{}\n{}<|im_end|>\n",
                message.role, message.content
            );
            let pos = prompt[cursor..]
                .find(&block)
                .expect("message block missing or out of order");
            cursor += pos + block.len();
        }
        assert!(prompt.ends_with("<|im_start|>assistant\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let messages = vec![
            msg(MessageRole::User, "same input"),
            msg(MessageRole::Assistant, "same output"),
        ];
        let a = PromptTemplate::ChatMl.render(&messages);
        let b = PromptTemplate::ChatMl.render(&messages);
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_keeps_message_content_verbatim() {
        // Delimiter-looking content is not escaped or dropped.
        let messages = vec![msg(MessageRole::User, "literal <|im_end|> inside")];
        let prompt = PromptTemplate::ChatMl.render(&messages);
        assert!(prompt.contains("literal <|im_end|> inside"));
    }
}
