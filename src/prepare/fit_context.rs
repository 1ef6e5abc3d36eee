//! Context fitting: trim conversation content into the model's input budget.
//!
//! The budget is an estimate, `(context_window - max_output_tokens) *
//! CHARS_PER_TOKEN`, not an exact token count. Victim selection is a greedy
//! heuristic over weighted content lengths; the scan is linear and the first
//! strictly-largest weight wins, which keeps trim results reproducible.
//! All counting and cutting is done in chars, never bytes.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::types::{Message, MessageContent, MessageRole};

/// Approximate chars-per-token ratio used for the budget estimate.
pub const CHARS_PER_TOKEN: usize = 4;

/// Floor length a trimmed message is cut down to.
pub const TRIM_TO_LEN: usize = 60;

/// Hard cap on trim passes; running out is a soft failure, not an error.
pub const MAX_TRIM_PASSES: usize = 100;

/// The last N messages are strongly protected from trimming.
pub const PROTECTED_RECENT_WINDOW: usize = 4;

/// Shrink message contents until the conversation fits the char budget.
///
/// System messages are never shortened. If the pass cap is reached while
/// still over budget the conversation is returned as-is; the provider may
/// reject it, which callers accept as a documented soft limit.
pub fn fit_into_context(
    mut messages: Vec<Message>,
    context_window: u32,
    max_output_tokens: u32,
) -> Vec<Message> {
    let budget = (context_window as i64 - max_output_tokens as i64) * CHARS_PER_TOKEN as i64;
    let total: i64 = messages.iter().map(|m| m.content.char_len() as i64).sum();
    let mut remaining = total - budget;
    if remaining <= 0 {
        return messages;
    }
    debug!(deficit = remaining, budget, "conversation over context budget, trimming");

    let mut already_trimmed: HashSet<usize> = HashSet::new();

    for _ in 0..MAX_TRIM_PASSES {
        if remaining <= 0 {
            break;
        }
        let Some(victim) = select_victim(&messages, &already_trimmed) else {
            break;
        };

        let len = messages[victim].content.char_len() as i64;
        let chars_past_floor = len - TRIM_TO_LEN as i64;

        // If cutting this one message covers the whole deficit, cut exactly
        // the remainder from its end and stop.
        if chars_past_floor > remaining {
            let keep = (len - remaining) as usize;
            rewrite_text(&mut messages[victim], |s| truncate_chars(s, keep));
            remaining = 0;
            break;
        }

        remaining -= chars_past_floor;
        rewrite_text(&mut messages[victim], |s| {
            let mut cut = truncate_chars(s, TRIM_TO_LEN - 3);
            cut.push_str("...");
            cut
        });
        already_trimmed.insert(victim);
    }

    if remaining > 0 {
        warn!(
            excess_chars = remaining,
            "trim pass cap reached, request may exceed the provider budget"
        );
    }
    messages
}

/// Trim desirability. Higher weight trims first.
///
/// System messages and block-structured content are never candidates. Older
/// messages weigh more (base multiplier ramps from ~2 at the start down to
/// ~1 at the end), assistant content weighs 10x user content, and the first
/// message, the most recent window, and anything already trimmed once are
/// damped to 5%.
fn weight(msg: &Message, idx: usize, count: usize, already_trimmed: &HashSet<usize>) -> f64 {
    if msg.role == MessageRole::System {
        return 0.0;
    }
    let base = match &msg.content {
        MessageContent::Text(s) => s.chars().count() as f64,
        MessageContent::Blocks(_) => return 0.0,
    };

    let mut multiplier = 1.0 + (count - 1 - idx) as f64 / count as f64;
    if msg.role != MessageRole::User {
        multiplier *= 10.0;
    }
    if idx == 0 || idx + PROTECTED_RECENT_WINDOW >= count || already_trimmed.contains(&idx) {
        multiplier *= 0.05;
    }

    base * multiplier
}

/// Linear scan, first strictly-largest weight wins. Returns `None` when no
/// message has positive weight, which upholds the system-message guarantee
/// even for degenerate inputs.
fn select_victim(messages: &[Message], already_trimmed: &HashSet<usize>) -> Option<usize> {
    let mut best_idx = None;
    let mut best_weight = 0.0_f64;
    for (idx, msg) in messages.iter().enumerate() {
        let w = weight(msg, idx, messages.len(), already_trimmed);
        if w > best_weight {
            best_weight = w;
            best_idx = Some(idx);
        }
    }
    best_idx
}

fn rewrite_text(msg: &mut Message, f: impl FnOnce(&str) -> String) {
    if let MessageContent::Text(s) = &mut msg.content {
        *s = f(s);
    }
}

/// First `max_chars` chars of `s`, cut on a char boundary.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}
