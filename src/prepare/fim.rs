//! Fill-in-the-middle preparation: a sibling path to the chat pipeline.
//!
//! FIM payloads are assumed small by construction — the caller bounds
//! prefix/suffix size — so no context fitting happens here.

use serde::{Deserialize, Serialize};

/// Fixed output ceiling for FIM completions.
pub const FIM_MAX_TOKENS: u32 = 300;

/// Raw fill-in-the-middle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FimRequest {
    pub prefix: String,
    pub suffix: String,
    pub stop_tokens: Vec<String>,
}

/// A FIM request ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedFim {
    pub prefix: String,
    pub suffix: String,
    pub stop_tokens: Vec<String>,
    pub max_tokens: u32,
}

/// Prepend a comment-formatted instruction block to the prefix (when
/// instructions are non-empty) and pin `max_tokens`.
///
/// FIM models see raw code, not chat turns, so standing instructions ride
/// along as `//` comment lines the model will skip over.
pub fn prepare_fim_message(request: &FimRequest, ai_instructions: &str) -> PreparedFim {
    let prefix = if ai_instructions.is_empty() {
        request.prefix.clone()
    } else {
        let commented = ai_instructions
            .split('\n')
            .map(|line| format!("//{line}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "// Instructions:\n\
             // Do not output an explanation. Try to avoid outputting comments. Only output the middle code.\n\
             {commented}\n\n{}",
            request.prefix
        )
    };

    PreparedFim {
        prefix,
        suffix: request.suffix.clone(),
        stop_tokens: request.stop_tokens.clone(),
        max_tokens: FIM_MAX_TOKENS,
    }
}
