// src/llm/client/mod.rs

use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::{ChatMessage, ResponseSchema, StructuredCompletion};

pub mod config;

pub use config::ClientConfig;

/// Chat completions client that requests `json_schema` formatted output
pub struct OpenAiClient {
    client: ReqwestClient,
    config: ClientConfig,
}

impl OpenAiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Initializing OpenAI client: model={}, temperature={}, timeout={}s",
            config.model, config.temperature, config.timeout_secs
        );

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn build_request(&self, messages: &[ChatMessage], schema: &ResponseSchema) -> Value {
        json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "response_format": schema.response_format(),
        })
    }
}

/// Pull the assistant message out of a chat completions response and parse it as JSON
pub fn extract_structured_content(response: &Value) -> Result<Value> {
    let message = response
        .pointer("/choices/0/message")
        .ok_or_else(|| anyhow!("No choices in completion response"))?;

    if let Some(refusal) = message.get("refusal").and_then(|r| r.as_str()) {
        return Err(anyhow!("Model refused to answer: {}", refusal));
    }

    let content = message
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| anyhow!("No content in completion response"))?;

    serde_json::from_str(content).context("Completion content is not valid JSON")
}

#[async_trait]
impl StructuredCompletion for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, messages: &[ChatMessage], schema: &ResponseSchema) -> Result<Value> {
        let start = Instant::now();
        let body = self.build_request(messages, schema);

        debug!("Completion request: {}", serde_json::to_string_pretty(&body)?);

        let response = self
            .client
            .post(self.config.chat_completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach chat completions endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            error!("OpenAI API error {}: {}", status, error_text);
            return Err(anyhow!("OpenAI API error {}: {}", status, error_text));
        }

        let raw: Value = response.json().await?;
        debug!(
            "Completion response in {}ms: {}",
            start.elapsed().as_millis(),
            raw
        );

        extract_structured_content(&raw)
    }
}
