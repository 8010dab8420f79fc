// src/prompt/mod.rs
// Prompt construction for classification requests

pub mod builder;

pub use builder::{build_classification_prompt, build_messages, SYSTEM_PROMPT};
