// src/lib.rs

pub mod classifier;
pub mod config;
pub mod llm;
pub mod prompt;
pub mod taxonomy;

pub use classifier::{ClassificationResult, Classifier, ClassifyError, RetryPolicy, Selection};
pub use config::{ClassifierConfig, CONFIG};
pub use taxonomy::{CategoryId, Taxonomy};
