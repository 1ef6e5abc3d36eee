//! Reasoning projection: fold raw provider reasoning into canonical content.

use crate::types::{ContentBlock, Message, MessageContent, MessageRole};

/// For assistant messages carrying a reasoning payload: when the destination
/// echoes reasoning signatures verbatim, content becomes the reasoning blocks
/// followed by a trailing text block with the original content (if any);
/// otherwise the payload is dropped and the content stands alone.
/// Non-assistant messages pass through unchanged.
pub fn project_reasoning(messages: Vec<Message>, supports_passthrough: bool) -> Vec<Message> {
    messages
        .into_iter()
        .map(|mut m| {
            if m.role != MessageRole::Assistant || m.reasoning.is_empty() {
                return m;
            }
            let reasoning = std::mem::take(&mut m.reasoning);
            if supports_passthrough {
                let mut blocks: Vec<ContentBlock> =
                    reasoning.into_iter().map(ContentBlock::reasoning).collect();
                match m.content {
                    MessageContent::Text(text) => {
                        if !text.is_empty() {
                            blocks.push(ContentBlock::text(text));
                        }
                    }
                    MessageContent::Blocks(existing) => blocks.extend(existing),
                }
                m.content = MessageContent::Blocks(blocks);
            }
            m
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReasoningBlock;
    use serde_json::json;

    fn thinking(text: &str) -> ReasoningBlock {
        ReasoningBlock::from(json!({
            "type": "thinking",
            "thinking": text,
            "signature": "sig"
        }))
    }

    #[test]
    fn passthrough_prepends_reasoning_and_keeps_answer_text() {
        let input = vec![Message::assistant_with_reasoning(
            "the answer",
            vec![thinking("step one")],
        )];
        let out = project_reasoning(input, true);
        assert!(out[0].reasoning.is_empty());
        assert_eq!(
            out[0].content,
            MessageContent::blocks(vec![
                ContentBlock::reasoning(thinking("step one")),
                ContentBlock::text("the answer"),
            ])
        );
    }

    #[test]
    fn passthrough_with_empty_answer_has_no_trailing_text_block() {
        let input = vec![Message::assistant_with_reasoning("", vec![thinking("t")])];
        let out = project_reasoning(input, true);
        assert_eq!(
            out[0].content,
            MessageContent::blocks(vec![ContentBlock::reasoning(thinking("t"))])
        );
    }

    #[test]
    fn unsupported_destination_drops_the_payload() {
        let input = vec![Message::assistant_with_reasoning(
            "visible",
            vec![thinking("hidden")],
        )];
        let out = project_reasoning(input, false);
        assert!(out[0].reasoning.is_empty());
        assert_eq!(out[0].content, MessageContent::text("visible"));
    }

    #[test]
    fn non_assistant_messages_pass_through() {
        let input = vec![Message::system("sys"), Message::user("usr")];
        let out = project_reasoning(input.clone(), true);
        assert_eq!(out, input);
    }
}
