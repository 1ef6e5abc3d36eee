//! # wireprep
//!
//! Message preparation pipeline for provider-bound LLM requests. Takes a raw
//! conversation (system/user/assistant turns, possibly with reasoning
//! blocks) and normalizes, budget-fits, and reshapes it into a canonical
//! form that a wire-format mapper can serialize for any provider.
//!
//! ## Overview
//!
//! The pipeline runs five stages in a fixed order — normalize,
//! fit-to-context, reasoning projection, system-instruction injection,
//! empty-content guard — each a pure function producing new messages. It
//! never fails: malformed or oversized input degrades into a still-sendable
//! request rather than an error.
//!
//! Context fitting is deliberately approximate (a chars-per-token estimate,
//! not a tokenizer), and the actual network send, streaming, and
//! provider-specific JSON shapes are out of scope; this crate ends where a
//! transport begins.
//!
//! ## Quick Start
//!
//! ```rust
//! use wireprep::{prepare_messages, Catalog, Message, PrepareOptions};
//!
//! let catalog = Catalog::builtin();
//! let caps = catalog.resolve("anthropic", "claude-3-7-sonnet-latest");
//!
//! let conversation = vec![
//!     Message::system("Be terse."),
//!     Message::user("What is FIM?"),
//! ];
//!
//! let prepared = prepare_messages(
//!     &conversation,
//!     &PrepareOptions::from_capabilities(&caps, "Answer in English."),
//! );
//!
//! // Anthropic-style destinations carry the system prompt out-of-band.
//! assert!(prepared.separate_system_message.is_some());
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Canonical message model (roles, content, reasoning blocks) |
//! | [`capabilities`] | Static model capability catalog with overrides |
//! | [`prepare`] | The preparation pipeline and the FIM sibling path |
//! | [`utils`] | Tolerant tool-argument parsing |

pub mod capabilities;
pub mod error;
pub mod prepare;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use capabilities::{Catalog, ModelCapabilities, SystemMessageSupport};
pub use error::{Error, Result};
pub use prepare::{
    prepare_fim_message, prepare_messages, FimRequest, PreparedFim, PreparedMessages,
    PrepareOptions,
};
pub use prepare::{
    CHARS_PER_TOKEN, DEFAULT_MAX_OUTPUT_TOKENS, EMPTY_MESSAGE, FIM_MAX_TOKENS, MAX_TRIM_PASSES,
    PROTECTED_RECENT_WINDOW, TRIM_TO_LEN,
};
pub use types::{ContentBlock, Message, MessageContent, MessageRole, ReasoningBlock};
