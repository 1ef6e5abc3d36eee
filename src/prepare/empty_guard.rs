//! Empty-content guard: the final pipeline stage.
//!
//! Most provider APIs reject messages with empty content, so anything still
//! empty here is replaced with a sentinel. Runs last so no earlier stage can
//! reintroduce an empty message undetected.

use crate::types::{ContentBlock, Message, MessageContent};

/// Sentinel substituted for empty content.
pub const EMPTY_MESSAGE: &str = "(empty message)";

/// Replace empty string content with the sentinel. For block content, empty
/// text blocks get the sentinel text and an empty block list gains a single
/// sentinel text block. Idempotent.
pub fn ensure_no_empty_content(messages: Vec<Message>) -> Vec<Message> {
    messages
        .into_iter()
        .map(|mut m| {
            match &mut m.content {
                MessageContent::Text(s) => {
                    if s.is_empty() {
                        *s = EMPTY_MESSAGE.to_string();
                    }
                }
                MessageContent::Blocks(blocks) => {
                    for block in blocks.iter_mut() {
                        if let ContentBlock::Text { text } = block {
                            if text.is_empty() {
                                *text = EMPTY_MESSAGE.to_string();
                            }
                        }
                    }
                    if blocks.is_empty() {
                        blocks.push(ContentBlock::text(EMPTY_MESSAGE));
                    }
                }
            }
            m
        })
        .collect()
}
