//! System-instruction injection: route the system prompt into whatever slot
//! the destination model actually has.

use tracing::debug;

use crate::capabilities::SystemMessageSupport;
use crate::types::{Message, MessageContent, MessageRole};

/// Collect all system-role content (joined with newlines), append standing
/// instructions under a `GUIDELINES` heading, and place the combined string
/// per the destination's capability:
///
/// - `Separated`: returned out-of-band, not in the message array.
/// - `SystemRole` / `DeveloperRole`: one new leading message with that role.
/// - `Unsupported`: wrapped in `<SYSTEM_MESSAGE>` tags and prepended to the
///   first message's content (a user turn by pipeline precondition), which
///   it replaces.
///
/// All original system-role messages are removed. With nothing to inject the
/// sequence is returned unchanged.
pub fn inject_system_instructions(
    messages: Vec<Message>,
    ai_instructions: &str,
    support: SystemMessageSupport,
) -> (Vec<Message>, Option<String>) {
    let joined = messages
        .iter()
        .filter(|m| m.role == MessageRole::System)
        .map(|m| m.content.rendered_text())
        .collect::<Vec<_>>()
        .join("\n");

    let mut combined = if joined.is_empty() { None } else { Some(joined) };
    if !ai_instructions.is_empty() {
        let prefix = combined
            .map(|s| format!("{s}\n\n"))
            .unwrap_or_default();
        combined = Some(format!("{prefix}GUIDELINES\n{ai_instructions}"));
    }

    // System-role messages never survive this stage, even when there is
    // nothing to inject (an empty-content system turn is simply dropped).
    let mut rest: Vec<Message> = messages
        .into_iter()
        .filter(|m| m.role != MessageRole::System)
        .collect();

    let Some(system_str) = combined else {
        return (rest, None);
    };

    match support {
        SystemMessageSupport::Separated => (rest, Some(system_str)),
        SystemMessageSupport::SystemRole => {
            rest.insert(0, Message::system(system_str));
            (rest, None)
        }
        SystemMessageSupport::DeveloperRole => {
            rest.insert(
                0,
                Message::with_content(MessageRole::Developer, MessageContent::text(system_str)),
            );
            (rest, None)
        }
        SystemMessageSupport::Unsupported => {
            debug!("destination has no system slot, inlining into first user turn");
            let first_text = rest
                .first()
                .map(|m| m.content.rendered_text())
                .unwrap_or_default();
            let merged = format!("<SYSTEM_MESSAGE>\n{system_str}\n</SYSTEM_MESSAGE>\n{first_text}");
            if !rest.is_empty() {
                rest.remove(0);
            }
            rest.insert(0, Message::user(merged));
            (rest, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageContent;

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("Be terse"),
            Message::user("Hi"),
            Message::assistant("Hello!"),
        ]
    }

    #[test]
    fn separated_moves_system_out_of_band() {
        let (msgs, sep) =
            inject_system_instructions(conversation(), "", SystemMessageSupport::Separated);
        assert_eq!(sep.as_deref(), Some("Be terse"));
        assert_eq!(msgs, vec![Message::user("Hi"), Message::assistant("Hello!")]);
    }

    #[test]
    fn system_role_prepends_one_combined_message() {
        let input = vec![
            Message::system("one"),
            Message::user("Hi"),
            Message::system("two"),
        ];
        let (msgs, sep) =
            inject_system_instructions(input, "", SystemMessageSupport::SystemRole);
        assert_eq!(sep, None);
        assert_eq!(msgs[0], Message::system("one\ntwo"));
        assert_eq!(msgs.len(), 2);
    }

    #[test]
    fn developer_role_uses_developer_slot() {
        let (msgs, _) =
            inject_system_instructions(conversation(), "", SystemMessageSupport::DeveloperRole);
        assert_eq!(msgs[0].role, MessageRole::Developer);
        assert_eq!(msgs[0].content, MessageContent::text("Be terse"));
    }

    #[test]
    fn unsupported_wraps_and_merges_into_first_user_turn() {
        let (msgs, sep) =
            inject_system_instructions(conversation(), "", SystemMessageSupport::Unsupported);
        assert_eq!(sep, None);
        assert_eq!(
            msgs,
            vec![
                Message::user("<SYSTEM_MESSAGE>\nBe terse\n</SYSTEM_MESSAGE>\nHi"),
                Message::assistant("Hello!"),
            ]
        );
    }

    #[test]
    fn guidelines_append_after_system_content() {
        let (msgs, _) = inject_system_instructions(
            conversation(),
            "prefer snake_case",
            SystemMessageSupport::SystemRole,
        );
        assert_eq!(
            msgs[0].content,
            MessageContent::text("Be terse\n\nGUIDELINES\nprefer snake_case")
        );
    }

    #[test]
    fn guidelines_alone_without_system_messages() {
        let input = vec![Message::user("Hi")];
        let (msgs, sep) = inject_system_instructions(
            input,
            "no emoji",
            SystemMessageSupport::Separated,
        );
        assert_eq!(sep.as_deref(), Some("GUIDELINES\nno emoji"));
        assert_eq!(msgs, vec![Message::user("Hi")]);
    }

    #[test]
    fn nothing_to_inject_is_a_no_op_for_all_modes() {
        let input = vec![Message::user("Hi"), Message::assistant("Hello!")];
        for support in [
            SystemMessageSupport::Unsupported,
            SystemMessageSupport::SystemRole,
            SystemMessageSupport::DeveloperRole,
            SystemMessageSupport::Separated,
        ] {
            let (msgs, sep) = inject_system_instructions(input.clone(), "", support);
            assert_eq!(msgs, input);
            assert_eq!(sep, None);
        }
    }

    #[test]
    fn unsupported_with_no_remaining_messages_yields_sole_user_turn() {
        let input = vec![Message::system("only system")];
        let (msgs, _) =
            inject_system_instructions(input, "", SystemMessageSupport::Unsupported);
        assert_eq!(
            msgs,
            vec![Message::user(
                "<SYSTEM_MESSAGE>\nonly system\n</SYSTEM_MESSAGE>\n"
            )]
        );
    }

    #[test]
    fn empty_system_content_is_dropped_without_relocation() {
        // A system message whose content trimmed down to nothing joins to an
        // empty string: nothing to inject, but the empty turn still goes.
        let input = vec![Message::system(""), Message::user("Hi")];
        let (msgs, sep) =
            inject_system_instructions(input, "", SystemMessageSupport::Separated);
        assert_eq!(sep, None);
        assert_eq!(msgs, vec![Message::user("Hi")]);
    }
}
