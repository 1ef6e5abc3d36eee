//! Core type definitions for the canonical message model.

pub mod message;

pub use message::{ContentBlock, Message, MessageContent, MessageRole, ReasoningBlock};
