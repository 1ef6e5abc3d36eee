//! The message preparation pipeline.
//!
//! Stage order is fixed: normalize → fit-to-context → reasoning projection →
//! system-instruction injection → empty-content guard. Each stage is a pure
//! function from (messages, params) to new messages; the input slice is never
//! mutated. The pipeline raises no errors — it always yields a sendable
//! request, accepting over-budget output as a documented soft failure when
//! the trim loop cannot converge.

pub mod empty_guard;
pub mod fim;
pub mod fit_context;
pub mod normalize;
pub mod reasoning;
pub mod system_message;

pub use empty_guard::EMPTY_MESSAGE;
pub use fim::{prepare_fim_message, FimRequest, PreparedFim, FIM_MAX_TOKENS};
pub use fit_context::{CHARS_PER_TOKEN, MAX_TRIM_PASSES, PROTECTED_RECENT_WINDOW, TRIM_TO_LEN};

use crate::capabilities::{ModelCapabilities, SystemMessageSupport};
use crate::types::Message;

/// Output token ceiling assumed when capabilities leave it unspecified.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4_096;

/// Per-request parameters for [`prepare_messages`].
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Standing user instructions appended to the system prompt under a
    /// `GUIDELINES` heading; empty means none.
    pub ai_instructions: String,
    pub supports_system_message: SystemMessageSupport,
    pub supports_reasoning_passthrough: bool,
    pub context_window: u32,
    pub max_output_tokens: Option<u32>,
}

impl PrepareOptions {
    pub fn from_capabilities(
        caps: &ModelCapabilities,
        ai_instructions: impl Into<String>,
    ) -> Self {
        Self {
            ai_instructions: ai_instructions.into(),
            supports_system_message: caps.supports_system_message,
            supports_reasoning_passthrough: caps.supports_reasoning_passthrough,
            context_window: caps.context_window,
            max_output_tokens: caps.max_output_tokens,
        }
    }
}

/// A conversation ready for wire-format mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedMessages {
    pub messages: Vec<Message>,
    /// Populated only for destinations that carry the system prompt outside
    /// the message array (`SystemMessageSupport::Separated`).
    pub separate_system_message: Option<String>,
}

/// Run the full preparation pipeline over a raw conversation.
pub fn prepare_messages(messages: &[Message], opts: &PrepareOptions) -> PreparedMessages {
    let max_output_tokens = opts
        .max_output_tokens
        .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);

    let messages = normalize::normalize(messages);
    let messages =
        fit_context::fit_into_context(messages, opts.context_window, max_output_tokens);
    let messages = reasoning::project_reasoning(messages, opts.supports_reasoning_passthrough);
    let (messages, separate_system_message) = system_message::inject_system_instructions(
        messages,
        &opts.ai_instructions,
        opts.supports_system_message,
    );
    let messages = empty_guard::ensure_no_empty_content(messages);

    PreparedMessages {
        messages,
        separate_system_message,
    }
}
