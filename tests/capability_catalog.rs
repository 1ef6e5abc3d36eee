//! Catalog resolution and override-file loading.

use std::collections::HashMap;

use wireprep::{Catalog, Error, ModelCapabilities, SystemMessageSupport};

#[test]
fn builtin_resolution_by_family_substring() {
    let catalog = Catalog::builtin();

    let claude = catalog.resolve("anthropic", "claude-3-7-sonnet-20250219");
    assert_eq!(
        claude.supports_system_message,
        SystemMessageSupport::Separated
    );
    assert!(claude.supports_reasoning_passthrough);

    let o1 = catalog.resolve("openai", "o1-2024-12-17");
    assert_eq!(
        o1.supports_system_message,
        SystemMessageSupport::DeveloperRole
    );
}

#[test]
fn cross_provider_fallback_by_name() {
    let catalog = Catalog::builtin();
    // An aggregator provider routing an Anthropic model still resolves to
    // the Anthropic family entry.
    let caps = catalog.resolve("openrouter", "anthropic/claude-3.7-sonnet:thinking");
    assert_eq!(caps.supports_system_message, SystemMessageSupport::Separated);
}

#[test]
fn unknown_model_resolves_to_conservative_defaults() {
    let caps = Catalog::builtin().resolve("openai-compatible", "totally-new-model");
    assert_eq!(caps.context_window, 32_000);
    assert_eq!(caps.max_output_tokens, Some(4_096));
    assert_eq!(
        caps.supports_system_message,
        SystemMessageSupport::Unsupported
    );
    assert!(!caps.supports_reasoning_passthrough);
    assert!(!caps.supports_fim);
}

#[test]
fn override_file_round_trip() {
    let yaml = "\
my-finetune-32k:
  context_window: 32000
  max_output_tokens: 8192
  supports_system_message: system-role
legacy-base:
  context_window: 2048
  supports_system_message: false
";
    let path = std::env::temp_dir().join("wireprep-overrides-test.yaml");
    std::fs::write(&path, yaml).unwrap();

    let catalog = Catalog::with_overrides_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let tuned = catalog.resolve("openai-compatible", "my-finetune-32k");
    assert_eq!(tuned.max_output_tokens, Some(8_192));
    assert_eq!(
        tuned.supports_system_message,
        SystemMessageSupport::SystemRole
    );

    let legacy = catalog.resolve("openai-compatible", "legacy-base");
    assert_eq!(legacy.context_window, 2_048);
    assert_eq!(
        legacy.supports_system_message,
        SystemMessageSupport::Unsupported
    );
}

#[test]
fn missing_override_file_is_an_io_error() {
    let err = Catalog::with_overrides_file("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn invalid_override_entry_is_a_validation_error() {
    let mut overrides = HashMap::new();
    overrides.insert(
        "broken".to_string(),
        ModelCapabilities {
            max_output_tokens: Some(0),
            ..ModelCapabilities::default()
        },
    );
    let err = Catalog::with_overrides(overrides).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(err.to_string().contains("broken"));
}
