// src/llm/mod.rs
// Structured completion interface and the OpenAI-backed implementation

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod client;
pub mod schema;

pub use client::{ClientConfig, OpenAiClient};
pub use schema::ResponseSchema;

/// Role-tagged chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Anything that can turn a message list into a JSON value shaped by a schema
#[async_trait]
pub trait StructuredCompletion: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    async fn complete(&self, messages: &[ChatMessage], schema: &ResponseSchema) -> Result<Value>;
}
