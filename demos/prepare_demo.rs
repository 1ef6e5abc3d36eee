//! Walk a conversation through the full preparation pipeline and print the
//! result for two very different destinations.
//!
//! Run with `RUST_LOG=wireprep=debug` to watch the trim pass work.

use anyhow::Result;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use wireprep::{prepare_messages, Catalog, Message, PrepareOptions, ReasoningBlock};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let conversation = vec![
        Message::system("You are a senior Rust reviewer."),
        Message::user("Why does this borrow fail?  \n"),
        Message::assistant_with_reasoning(
            "The mutable borrow overlaps the iterator's shared borrow.",
            vec![ReasoningBlock::from(json!({
                "type": "thinking",
                "thinking": "iterator holds &self, push needs &mut self",
                "signature": "sig-0001"
            }))],
        ),
        Message::user("Show me a fix."),
    ];

    let catalog = Catalog::builtin();

    for (provider, model) in [
        ("anthropic", "claude-3-7-sonnet-latest"),
        ("ollama", "starcoder2:7b"),
    ] {
        let caps = catalog.resolve(provider, model);
        let prepared = prepare_messages(
            &conversation,
            &PrepareOptions::from_capabilities(&caps, "Keep answers under ten lines."),
        );

        println!("=== {provider}/{model} ===");
        if let Some(system) = &prepared.separate_system_message {
            println!("separate system prompt:\n{system}\n");
        }
        println!("{}\n", serde_json::to_string_pretty(&prepared.messages)?);
    }

    Ok(())
}
