//! Conversation normalization: the first pipeline stage.

use crate::types::{ContentBlock, Message, MessageContent};

/// Deep-copy the conversation with every string content trimmed of leading
/// and trailing whitespace. No messages are added or removed.
///
/// An earlier revision also collapsed duplicate adjacent roles here; that
/// behavior is retired and deliberately not reintroduced.
pub fn normalize(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .map(|m| {
            let mut m = m.clone();
            m.content = trim_content(m.content);
            m
        })
        .collect()
}

fn trim_content(content: MessageContent) -> MessageContent {
    match content {
        MessageContent::Text(s) => MessageContent::Text(s.trim().to_string()),
        MessageContent::Blocks(blocks) => MessageContent::Blocks(
            blocks
                .into_iter()
                .map(|b| match b {
                    ContentBlock::Text { text } => ContentBlock::Text {
                        text: text.trim().to_string(),
                    },
                    other => other,
                })
                .collect(),
        ),
    }
}
