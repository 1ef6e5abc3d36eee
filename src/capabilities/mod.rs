//! Model capability catalog.
//!
//! Centralizes knowledge about model-specific request shape (context window,
//! output token ceiling, system-message slot, reasoning echo) so the
//! preparation pipeline can consume capabilities instead of pattern-matching
//! on model names. Resolution never fails: unknown models get conservative
//! defaults.

mod catalog;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// How a model accepts system-level instructions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SystemMessageSupport {
    /// No system slot at all; instructions must be inlined into the first
    /// user turn.
    #[default]
    Unsupported,
    /// A leading message with role `system`.
    SystemRole,
    /// A leading message with role `developer` (OpenAI reasoning models).
    DeveloperRole,
    /// A dedicated field outside the message array (Anthropic-style).
    Separated,
}

impl SystemMessageSupport {
    pub fn is_supported(self) -> bool {
        self != SystemMessageSupport::Unsupported
    }
}

// On the wire this is `false | "system-role" | "developer-role" | "separated"`,
// so serde needs hand-written impls for the bool/string union.
impl Serialize for SystemMessageSupport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SystemMessageSupport::Unsupported => serializer.serialize_bool(false),
            SystemMessageSupport::SystemRole => serializer.serialize_str("system-role"),
            SystemMessageSupport::DeveloperRole => serializer.serialize_str("developer-role"),
            SystemMessageSupport::Separated => serializer.serialize_str("separated"),
        }
    }
}

impl<'de> Deserialize<'de> for SystemMessageSupport {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct SupportVisitor;

        impl<'de> Visitor<'de> for SupportVisitor {
            type Value = SystemMessageSupport;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(
                    "`false` or one of \"system-role\", \"developer-role\", \"separated\"",
                )
            }

            fn visit_bool<E: de::Error>(
                self,
                v: bool,
            ) -> std::result::Result<Self::Value, E> {
                if v {
                    Err(E::invalid_value(Unexpected::Bool(true), &self))
                } else {
                    Ok(SystemMessageSupport::Unsupported)
                }
            }

            fn visit_str<E: de::Error>(
                self,
                v: &str,
            ) -> std::result::Result<Self::Value, E> {
                match v {
                    "system-role" => Ok(SystemMessageSupport::SystemRole),
                    "developer-role" => Ok(SystemMessageSupport::DeveloperRole),
                    "separated" => Ok(SystemMessageSupport::Separated),
                    other => Err(E::unknown_variant(
                        other,
                        &["system-role", "developer-role", "separated"],
                    )),
                }
            }
        }

        deserializer.deserialize_any(SupportVisitor)
    }
}

/// Static capability flags for a provider/model pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelCapabilities {
    /// Context window size in tokens (input budget).
    pub context_window: u32,
    /// Output token ceiling; `None` means unspecified and callers fall back
    /// to the pipeline default of 4096.
    pub max_output_tokens: Option<u32>,
    /// Which system-instruction slot the model takes.
    pub supports_system_message: SystemMessageSupport,
    /// Whether provider reasoning blocks may be echoed back verbatim
    /// (signature-validated chain-of-thought).
    pub supports_reasoning_passthrough: bool,
    /// Whether the model takes fill-in-the-middle completion requests.
    pub supports_fim: bool,
}

impl Default for ModelCapabilities {
    fn default() -> Self {
        catalog::DEFAULT_CAPABILITIES
    }
}

/// Capability lookup: builtin tables plus optional per-model overrides.
///
/// Overrides are keyed by exact model name and win over every builtin rule.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    overrides: HashMap<String, ModelCapabilities>,
}

impl Catalog {
    /// Builtin tables only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Builtin tables plus validated per-model overrides.
    pub fn with_overrides(overrides: HashMap<String, ModelCapabilities>) -> Result<Self> {
        for (model, caps) in &overrides {
            validate_entry(model, caps)?;
        }
        Ok(Self { overrides })
    }

    /// Load overrides from a YAML file mapping model name to capabilities:
    ///
    /// ```yaml
    /// my-finetune-32k:
    ///   context_window: 32000
    ///   max_output_tokens: 8192
    ///   supports_system_message: system-role
    /// ```
    pub fn with_overrides_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let overrides: HashMap<String, ModelCapabilities> = serde_yaml::from_str(&raw)?;
        Self::with_overrides(overrides)
    }

    /// Resolve capabilities for a provider/model pair. Never fails; unknown
    /// models resolve to conservative defaults.
    pub fn resolve(&self, provider: &str, model: &str) -> ModelCapabilities {
        if let Some(caps) = self.overrides.get(model) {
            return *caps;
        }
        catalog::resolve_builtin(provider, model)
    }
}

fn validate_entry(model: &str, caps: &ModelCapabilities) -> Result<()> {
    if caps.context_window == 0 {
        return Err(Error::validation(format!(
            "override for '{model}': context_window must be positive"
        )));
    }
    if caps.max_output_tokens == Some(0) {
        return Err(Error::validation(format!(
            "override for '{model}': max_output_tokens must be positive when set"
        )));
    }
    Ok(())
}
