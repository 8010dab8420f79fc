// src/config/mod.rs
// Runtime settings loaded from the environment (and .env when present)

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

use crate::classifier::RetryPolicy;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    // ── OpenAI Configuration
    pub openai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub openai_timeout: u64,

    // ── Retry Configuration
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,

    // ── Taxonomy
    pub taxonomy_path: Option<String>,

    // ── Logging Configuration
    pub log_level: String,
}

/// Parse `key` via `lookup`, dropping trailing `# comments`. Missing or unparsable values fall back to `default`.
fn env_var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        None => default,
    }
}

impl ClassifierConfig {
    pub fn from_env() -> Self {
        // A missing .env is normal; the real environment still applies
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let taxonomy_path: String = env_var_or(&lookup, "CLASSIFY_TAXONOMY_PATH", String::new());

        Self {
            openai_base_url: env_var_or(&lookup, "OPENAI_BASE_URL", "https://api.openai.com".to_string()),
            model: env_var_or(&lookup, "CLASSIFY_MODEL", "gpt-4o-mini".to_string()),
            temperature: env_var_or(&lookup, "CLASSIFY_TEMPERATURE", 0.0),
            openai_timeout: env_var_or(&lookup, "CLASSIFY_OPENAI_TIMEOUT", 60),
            max_attempts: env_var_or(&lookup, "CLASSIFY_MAX_ATTEMPTS", 3),
            retry_backoff_ms: env_var_or(&lookup, "CLASSIFY_RETRY_BACKOFF_MS", 0),
            taxonomy_path: (!taxonomy_path.is_empty()).then_some(taxonomy_path),
            log_level: env_var_or(&lookup, "CLASSIFY_LOG_LEVEL", "info".to_string()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts)
            .with_backoff(Duration::from_millis(self.retry_backoff_ms))
    }

    pub fn is_debug(&self) -> bool {
        matches!(self.log_level.to_lowercase().as_str(), "debug" | "trace")
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<ClassifierConfig> = Lazy::new(ClassifierConfig::from_env);
