//! Builtin capability tables.
//!
//! Entries are matched by substring against the lowercased model name, most
//! specific first, so dated or suffixed model ids (`claude-3-7-sonnet-latest`,
//! `o3-mini-2025-01-31`) resolve without an exact row. Providers whose models
//! are autodetected at runtime (ollama, vllm, openrouter) have no table of
//! their own and go straight to the cross-family fallback list.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{ModelCapabilities, SystemMessageSupport};

/// Conservative defaults for unknown models: modest window, no system slot,
/// no reasoning echo.
pub(crate) const DEFAULT_CAPABILITIES: ModelCapabilities = caps(
    32_000,
    4_096,
    SystemMessageSupport::Unsupported,
    false,
    false,
);

const fn caps(
    context_window: u32,
    max_output_tokens: u32,
    supports_system_message: SystemMessageSupport,
    supports_reasoning_passthrough: bool,
    supports_fim: bool,
) -> ModelCapabilities {
    ModelCapabilities {
        context_window,
        max_output_tokens: Some(max_output_tokens),
        supports_system_message,
        supports_reasoning_passthrough,
        supports_fim,
    }
}

struct Entry {
    needle: &'static str,
    caps: ModelCapabilities,
}

const fn entry(needle: &'static str, caps: ModelCapabilities) -> Entry {
    Entry { needle, caps }
}

const ANTHROPIC: &[Entry] = &[
    // 3.5-generation models predate signature-validated reasoning.
    entry(
        "claude-3-5",
        caps(200_000, 8_192, SystemMessageSupport::Separated, false, false),
    ),
    entry(
        "claude-3-7",
        caps(200_000, 8_192, SystemMessageSupport::Separated, true, false),
    ),
    entry(
        "claude",
        caps(200_000, 8_192, SystemMessageSupport::Separated, true, false),
    ),
];

const OPENAI: &[Entry] = &[
    entry(
        "o3-mini",
        caps(
            200_000,
            100_000,
            SystemMessageSupport::DeveloperRole,
            false,
            false,
        ),
    ),
    // o1-mini takes neither a system nor a developer slot.
    entry(
        "o1-mini",
        caps(
            128_000,
            65_536,
            SystemMessageSupport::Unsupported,
            false,
            false,
        ),
    ),
    entry(
        "o1",
        caps(
            128_000,
            100_000,
            SystemMessageSupport::DeveloperRole,
            false,
            false,
        ),
    ),
    entry(
        "gpt-4o-mini",
        caps(
            128_000,
            16_384,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
    entry(
        "gpt-4o",
        caps(
            128_000,
            16_384,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
];

const GEMINI: &[Entry] = &[entry(
    "gemini",
    caps(
        1_000_000,
        8_192,
        SystemMessageSupport::Separated,
        false,
        false,
    ),
)];

const DEEPSEEK: &[Entry] = &[
    // The reasoner rejects system turns outright.
    entry(
        "deepseek-reasoner",
        caps(
            64_000,
            8_192,
            SystemMessageSupport::Unsupported,
            false,
            false,
        ),
    ),
    entry(
        "deepseek",
        caps(64_000, 8_192, SystemMessageSupport::SystemRole, false, false),
    ),
];

const XAI: &[Entry] = &[entry(
    "grok",
    caps(
        131_072,
        8_192,
        SystemMessageSupport::SystemRole,
        false,
        false,
    ),
)];

const GROQ: &[Entry] = &[
    entry(
        "qwq",
        caps(
            128_000,
            8_192,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
    entry(
        "llama",
        caps(
            128_000,
            8_192,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
];

/// Cross-family fallback consulted when the provider table has no match (or
/// the provider is unknown). Ordering matters: `codegemma` before `gemma`,
/// `deepseek-reasoner` before `deepseek`, dated families before bare names.
const FALLBACK: &[Entry] = &[
    entry(
        "claude-3-5",
        caps(200_000, 8_192, SystemMessageSupport::Separated, false, false),
    ),
    entry(
        "claude",
        caps(200_000, 8_192, SystemMessageSupport::Separated, true, false),
    ),
    entry(
        "grok",
        caps(
            131_072,
            8_192,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
    entry(
        "gemini",
        caps(
            1_000_000,
            8_192,
            SystemMessageSupport::Separated,
            false,
            false,
        ),
    ),
    entry(
        "deepseek-reasoner",
        caps(
            64_000,
            8_192,
            SystemMessageSupport::Unsupported,
            false,
            false,
        ),
    ),
    entry(
        "deepseek-r1",
        caps(
            64_000,
            8_192,
            SystemMessageSupport::Unsupported,
            false,
            false,
        ),
    ),
    entry(
        "deepseek",
        caps(64_000, 8_192, SystemMessageSupport::SystemRole, false, false),
    ),
    entry(
        "o3-mini",
        caps(
            200_000,
            100_000,
            SystemMessageSupport::DeveloperRole,
            false,
            false,
        ),
    ),
    entry(
        "o1-mini",
        caps(
            128_000,
            65_536,
            SystemMessageSupport::Unsupported,
            false,
            false,
        ),
    ),
    entry(
        "gpt-4o-mini",
        caps(
            128_000,
            16_384,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
    entry(
        "gpt-4o",
        caps(
            128_000,
            16_384,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
    entry(
        "codestral",
        caps(32_000, 4_096, SystemMessageSupport::SystemRole, false, true),
    ),
    entry(
        "starcoder2",
        caps(
            128_000,
            8_192,
            SystemMessageSupport::Unsupported,
            false,
            true,
        ),
    ),
    entry(
        "codegemma",
        caps(
            128_000,
            8_192,
            SystemMessageSupport::Unsupported,
            false,
            true,
        ),
    ),
    entry(
        "gemma",
        caps(32_000, 4_096, SystemMessageSupport::SystemRole, false, false),
    ),
    entry(
        "qwen2.5-coder",
        caps(32_000, 4_096, SystemMessageSupport::SystemRole, false, true),
    ),
    entry(
        "qwq",
        caps(
            128_000,
            8_192,
            SystemMessageSupport::SystemRole,
            false,
            false,
        ),
    ),
    entry(
        "phi4",
        caps(16_000, 4_096, SystemMessageSupport::SystemRole, false, false),
    ),
    entry(
        "llama",
        caps(32_000, 4_096, SystemMessageSupport::SystemRole, false, false),
    ),
];

static PROVIDER_INDEX: Lazy<HashMap<&'static str, &'static [Entry]>> = Lazy::new(|| {
    let mut index: HashMap<&'static str, &'static [Entry]> = HashMap::new();
    index.insert("anthropic", ANTHROPIC);
    index.insert("openai", OPENAI);
    index.insert("gemini", GEMINI);
    index.insert("deepseek", DEEPSEEK);
    index.insert("xai", XAI);
    index.insert("groq", GROQ);
    index
});

pub(crate) fn resolve_builtin(provider: &str, model: &str) -> ModelCapabilities {
    let lower = model.to_ascii_lowercase();
    if let Some(entries) = PROVIDER_INDEX
        .get(provider.to_ascii_lowercase().as_str())
    {
        if let Some(found) = first_match(entries, &lower) {
            return found;
        }
    }
    first_match(FALLBACK, &lower).unwrap_or(DEFAULT_CAPABILITIES)
}

fn first_match(entries: &[Entry], lower_model: &str) -> Option<ModelCapabilities> {
    entries
        .iter()
        .find(|e| lower_model.contains(e.needle))
        .map(|e| e.caps)
}
