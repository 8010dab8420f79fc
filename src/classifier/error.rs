// src/classifier/error.rs

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("completion request failed: {0}")]
    Completion(#[source] BoxError),

    #[error("model output does not match the classification schema: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("classification rejected: {0}")]
    Invalid(String),

    #[error("classification failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<ClassifyError>,
    },
}

impl ClassifyError {
    pub fn completion(err: anyhow::Error) -> Self {
        ClassifyError::Completion(err.into())
    }

    /// The failure of the final attempt, unwrapping `Exhausted`
    pub fn last_error(&self) -> &ClassifyError {
        match self {
            ClassifyError::Exhausted { last, .. } => last.last_error(),
            other => other,
        }
    }
}
