//! Canonical message format shared by every preparation stage.

use serde::{Deserialize, Serialize};

/// A single conversation turn.
///
/// The `reasoning` field carries raw provider reasoning attached to an
/// assistant turn before projection; after the reasoning-projection stage it
/// is always empty and the payload (if kept) lives inside `content` blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: MessageContent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasoning: Vec<ReasoningBlock>,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(text.into()),
            reasoning: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(text.into()),
            reasoning: Vec::new(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(text.into()),
            reasoning: Vec::new(),
        }
    }

    /// An assistant turn that carried chain-of-thought from the provider.
    pub fn assistant_with_reasoning(
        text: impl Into<String>,
        reasoning: Vec<ReasoningBlock>,
    ) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(text.into()),
            reasoning,
        }
    }

    pub fn with_content(role: MessageRole, content: MessageContent) -> Self {
        Self {
            role,
            content,
            reasoning: Vec::new(),
        }
    }
}

/// Message role.
///
/// `Developer` only ever appears on output, produced by system-instruction
/// injection for models that take a developer-role instruction slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Developer,
}

/// Message content (a plain string or an ordered array of content blocks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn blocks(blocks: Vec<ContentBlock>) -> Self {
        MessageContent::Blocks(blocks)
    }

    /// Content length in characters.
    ///
    /// For block content only text blocks count; reasoning payloads are
    /// opaque and excluded from budget accounting.
    pub fn char_len(&self) -> usize {
        match self {
            MessageContent::Text(s) => s.chars().count(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .map(|b| match b {
                    ContentBlock::Text { text } => text.chars().count(),
                    ContentBlock::Reasoning { .. } => 0,
                })
                .sum(),
        }
    }

    /// Flatten to plain text: the string itself, or text blocks joined with
    /// newlines (reasoning blocks are skipped).
    pub fn rendered_text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|b| match b {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    ContentBlock::Reasoning { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    Reasoning { payload: ReasoningBlock },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn reasoning(payload: ReasoningBlock) -> Self {
        ContentBlock::Reasoning { payload }
    }
}

/// Opaque provider reasoning payload.
///
/// Stored verbatim so that providers which validate reasoning signatures on
/// echo (Anthropic-style) receive back exactly the bytes they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasoningBlock(pub serde_json::Value);

impl From<serde_json::Value> for ReasoningBlock {
    fn from(value: serde_json::Value) -> Self {
        ReasoningBlock(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_serializes_as_string_or_array() {
        let text = Message::user("hi");
        let v = serde_json::to_value(&text).unwrap();
        assert_eq!(v, json!({"role": "user", "content": "hi"}));

        let blocks = Message::with_content(
            MessageRole::Assistant,
            MessageContent::blocks(vec![ContentBlock::text("ok")]),
        );
        let v = serde_json::to_value(&blocks).unwrap();
        assert_eq!(
            v,
            json!({"role": "assistant", "content": [{"type": "text", "text": "ok"}]})
        );
    }

    #[test]
    fn reasoning_payload_round_trips_verbatim() {
        let payload = json!({
            "type": "thinking",
            "thinking": "let me see",
            "signature": "sig-abc123"
        });
        let block = ReasoningBlock::from(payload.clone());
        let encoded = serde_json::to_value(&block).unwrap();
        assert_eq!(encoded, payload);
    }

    #[test]
    fn char_len_counts_chars_not_bytes() {
        let content = MessageContent::text("héllo"); // 5 chars, 6 bytes
        assert_eq!(content.char_len(), 5);
    }

    #[test]
    fn char_len_skips_reasoning_blocks() {
        let content = MessageContent::blocks(vec![
            ContentBlock::reasoning(ReasoningBlock::from(json!({"thinking": "hmm"}))),
            ContentBlock::text("abc"),
        ]);
        assert_eq!(content.char_len(), 3);
    }

    #[test]
    fn rendered_text_joins_text_blocks() {
        let content = MessageContent::blocks(vec![
            ContentBlock::text("a"),
            ContentBlock::reasoning(ReasoningBlock::from(json!({}))),
            ContentBlock::text("b"),
        ]);
        assert_eq!(content.rendered_text(), "a\nb");
    }
}
