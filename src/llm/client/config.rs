// src/llm/client/config.rs
// Connection settings for the chat completions client

use anyhow::Result;
use tracing::debug;

use crate::config::ClassifierConfig;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Take the API key from `OPENAI_API_KEY` and everything else from `config`
    pub fn from_env(config: &ClassifierConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY must be set"))?;

        debug!(
            "Initialized OpenAI client config: model={}, base_url={}, timeout={}s",
            config.model, config.openai_base_url, config.openai_timeout
        );

        Ok(Self {
            api_key,
            base_url: config.openai_base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout_secs: config.openai_timeout,
        })
    }

    /// Create configuration with custom values (for testing)
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url,
            model,
            temperature: 0.0,
            timeout_secs: 60,
        }
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("API key cannot be empty"));
        }

        if self.base_url.is_empty() {
            return Err(anyhow::anyhow!("Base URL cannot be empty"));
        }

        if self.model.is_empty() {
            return Err(anyhow::anyhow!("Model cannot be empty"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow::anyhow!("temperature must be between 0.0 and 2.0"));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("timeout must be at least one second"));
        }

        Ok(())
    }
}
