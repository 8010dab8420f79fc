// src/taxonomy/mod.rs
// Category taxonomy: the fixed set of topics a conversation can be classified into

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

mod builtin;

/// Identifier of a predefined category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    LanguageUnderstanding,
    LanguageGeneration,
    Reasoning,
    KnowledgeAndFactuality,
    Multilingualism,
}

impl CategoryId {
    pub const ALL: [CategoryId; 5] = [
        CategoryId::LanguageUnderstanding,
        CategoryId::LanguageGeneration,
        CategoryId::Reasoning,
        CategoryId::KnowledgeAndFactuality,
        CategoryId::Multilingualism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::LanguageUnderstanding => "language_understanding",
            CategoryId::LanguageGeneration => "language_generation",
            CategoryId::Reasoning => "reasoning",
            CategoryId::KnowledgeAndFactuality => "knowledge_and_factuality",
            CategoryId::Multilingualism => "multilingualism",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        CategoryId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| TaxonomyError::UnknownTopic(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("unknown topic '{0}'")]
    UnknownTopic(String),

    #[error("topic '{0}' is defined more than once")]
    DuplicateTopic(String),

    #[error("taxonomy must define at least one category")]
    Empty,

    #[error("failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse taxonomy: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A single predefined category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub topic: CategoryId,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub potential_tags: Vec<String>,
}

/// Ordered, immutable set of categories with unique topics
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

#[derive(Deserialize)]
struct TaxonomyFile {
    categories: Vec<RawCategory>,
}

#[derive(Deserialize)]
struct RawCategory {
    topic: String,
    description: String,
    #[serde(default)]
    examples: Vec<String>,
    #[serde(default)]
    potential_tags: Vec<String>,
}

impl Taxonomy {
    /// Build a taxonomy, rejecting empty sets and duplicate topics
    pub fn new(categories: Vec<Category>) -> Result<Self, TaxonomyError> {
        if categories.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.topic) {
                return Err(TaxonomyError::DuplicateTopic(category.topic.to_string()));
            }
        }

        Ok(Self { categories })
    }

    /// The five capability categories shipped with the classifier
    pub fn builtin() -> Self {
        Self {
            categories: builtin::categories(),
        }
    }

    /// Parse a taxonomy from TOML made of `[[categories]]` tables
    pub fn from_toml_str(input: &str) -> Result<Self, TaxonomyError> {
        let file: TaxonomyFile = toml::from_str(input)?;
        let categories = file
            .categories
            .into_iter()
            .map(|raw| {
                Ok(Category {
                    topic: raw.topic.parse()?,
                    description: raw.description,
                    examples: raw.examples,
                    potential_tags: raw.potential_tags,
                })
            })
            .collect::<Result<Vec<_>, TaxonomyError>>()?;

        Self::new(categories)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.topic == id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.get(id).is_some()
    }

    pub fn topics(&self) -> Vec<&'static str> {
        self.categories.iter().map(|c| c.topic.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Capabilities document embedded in the classification prompt
    pub fn to_prompt_json(&self) -> Value {
        let capabilities: Vec<Value> = self
            .categories
            .iter()
            .map(|c| {
                json!({
                    "topic": c.topic.as_str(),
                    "description": c.description,
                    "potential_tags": c.potential_tags,
                    "examples": c.examples,
                })
            })
            .collect();

        json!({ "capabilities": capabilities })
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}
