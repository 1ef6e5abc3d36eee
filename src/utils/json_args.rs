//! Tolerant parsing for tool-call argument strings.
//!
//! Providers occasionally hand back argument payloads that are not valid
//! JSON (truncated streams, models emitting prose). Downstream code needs a
//! value either way, so parsing degrades instead of failing.

use serde_json::{json, Value};

/// Parse a raw argument string as JSON; on failure, wrap the raw string
/// under an `"args"` key so the caller always gets a usable value.
pub fn parse_args(raw: &str) -> Value {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => json!({ "args": raw }),
    }
}
