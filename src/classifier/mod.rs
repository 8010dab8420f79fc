// src/classifier/mod.rs
// Retry-until-valid classification loop

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::llm::{ChatMessage, ResponseSchema, StructuredCompletion};
use crate::prompt::build_messages;
use crate::taxonomy::Taxonomy;

pub mod error;
pub mod types;

pub use error::ClassifyError;
pub use types::{CategoryMatch, ClassificationResult, NewCategory, Selection, TopicSummary};

pub const SCHEMA_NAME: &str = "conversation_classification";

/// Bounded retry settings for one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least 1
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Duration::ZERO,
        }
    }

    /// Base delay between attempts; scaled by attempt number plus jitter. Zero disables waiting.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if self.backoff.is_zero() {
            return None;
        }
        let jitter = Duration::from_millis(rand::random::<u64>() % 100);
        Some(self.backoff * attempt + jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Classifies conversations against a taxonomy using an injected completion backend
pub struct Classifier {
    completion: Arc<dyn StructuredCompletion>,
    taxonomy: Taxonomy,
    policy: RetryPolicy,
    schema: ResponseSchema,
}

impl Classifier {
    pub fn new(completion: Arc<dyn StructuredCompletion>, taxonomy: Taxonomy) -> Self {
        Self {
            completion,
            taxonomy,
            policy: RetryPolicy::default(),
            schema: ResponseSchema::for_type::<ClassificationResult>(SCHEMA_NAME),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn schema(&self) -> &ResponseSchema {
        &self.schema
    }

    /// Classify `conversation`.
    ///
    /// Returns the first result with `error == false`. Results with `error == true`
    /// are retried; if every attempt completes and none classifies, the last such
    /// result is returned. A failure on the final attempt is returned as
    /// [`ClassifyError::Exhausted`] wrapping that failure.
    pub async fn classify(&self, conversation: &str) -> Result<ClassificationResult, ClassifyError> {
        let messages = build_messages(&self.taxonomy, conversation);
        let max_attempts = self.policy.max_attempts();
        let mut unclassified: Option<ClassificationResult> = None;

        info!(
            "Classifying conversation with {} ({} chars, up to {} attempts)",
            self.completion.name(),
            conversation.len(),
            max_attempts
        );

        for attempt in 1..=max_attempts {
            match self.attempt(&messages).await {
                Ok(result) if !result.error => {
                    info!(
                        "Classified as '{}' on attempt {}/{}",
                        result.topic(),
                        attempt,
                        max_attempts
                    );
                    return Ok(result);
                }
                Ok(result) => {
                    warn!(
                        "Attempt {}/{} could not classify (proposed '{}')",
                        attempt,
                        max_attempts,
                        result.topic()
                    );
                    unclassified = Some(result);
                }
                Err(e) if attempt < max_attempts => {
                    warn!("Classification attempt {}/{} failed: {}", attempt, max_attempts, e);
                }
                Err(e) => {
                    return Err(ClassifyError::Exhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
            }

            if attempt < max_attempts {
                if let Some(delay) = self.policy.delay_after(attempt) {
                    debug!("Retrying classification after {:?}", delay);
                    sleep(delay).await;
                }
            }
        }

        // Reached only when the final attempt returned an unclassified result
        unclassified.ok_or_else(|| {
            ClassifyError::Invalid("no classification attempts were made".to_string())
        })
    }

    async fn attempt(&self, messages: &[ChatMessage]) -> Result<ClassificationResult, ClassifyError> {
        let raw = self
            .completion
            .complete(messages, &self.schema)
            .await
            .map_err(ClassifyError::completion)?;

        let result: ClassificationResult = serde_json::from_value(raw)?;
        result.validate(&self.taxonomy).map_err(ClassifyError::Invalid)?;

        Ok(result)
    }
}
