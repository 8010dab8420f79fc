// src/classifier/types.rs
// Structured classification returned by the model

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::taxonomy::{CategoryId, Taxonomy};

/// Full classification response, including the model's reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationResult {
    /// Step-by-step explanation of why the category was chosen
    pub chain_of_thought: String,
    /// True when the conversation fits none of the predefined categories
    #[serde(default)]
    pub error: bool,
    /// The chosen category, or a proposal for a new one
    pub selection: Selection,
}

/// One variant per predefined category plus the new-category proposal.
/// The `kind` tag doubles as the topic for predefined categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    LanguageUnderstanding(CategoryMatch),
    LanguageGeneration(CategoryMatch),
    Reasoning(CategoryMatch),
    KnowledgeAndFactuality(CategoryMatch),
    Multilingualism(CategoryMatch),
    NewCategory(NewCategory),
}

/// Match against a predefined category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryMatch {
    /// Tags from the category's suggestions; new tags are allowed
    pub tags: Vec<String>,
    /// Short specific title, fewer than 10 words
    pub title: String,
}

/// Proposal used when no predefined category fits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewCategory {
    /// Why the conversation could not be classified
    pub message: String,
    /// Proposed topic in snake_case
    pub topic: String,
    /// Proposed tags in snake_case
    pub tags: Vec<String>,
    /// Short specific title, fewer than 10 words
    pub title: String,
}

/// Flat topic/tags/title view of a result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicSummary {
    pub topic: String,
    pub tags: Vec<String>,
    pub title: String,
}

impl Selection {
    /// Build a predefined-category selection for the given id
    pub fn matched(id: CategoryId, tags: Vec<String>, title: impl Into<String>) -> Self {
        let m = CategoryMatch {
            tags,
            title: title.into(),
        };
        match id {
            CategoryId::LanguageUnderstanding => Selection::LanguageUnderstanding(m),
            CategoryId::LanguageGeneration => Selection::LanguageGeneration(m),
            CategoryId::Reasoning => Selection::Reasoning(m),
            CategoryId::KnowledgeAndFactuality => Selection::KnowledgeAndFactuality(m),
            CategoryId::Multilingualism => Selection::Multilingualism(m),
        }
    }

    /// Predefined category id, or None for a new-category proposal
    pub fn category(&self) -> Option<CategoryId> {
        match self {
            Selection::LanguageUnderstanding(_) => Some(CategoryId::LanguageUnderstanding),
            Selection::LanguageGeneration(_) => Some(CategoryId::LanguageGeneration),
            Selection::Reasoning(_) => Some(CategoryId::Reasoning),
            Selection::KnowledgeAndFactuality(_) => Some(CategoryId::KnowledgeAndFactuality),
            Selection::Multilingualism(_) => Some(CategoryId::Multilingualism),
            Selection::NewCategory(_) => None,
        }
    }

    fn as_match(&self) -> Option<&CategoryMatch> {
        match self {
            Selection::LanguageUnderstanding(m)
            | Selection::LanguageGeneration(m)
            | Selection::Reasoning(m)
            | Selection::KnowledgeAndFactuality(m)
            | Selection::Multilingualism(m) => Some(m),
            Selection::NewCategory(_) => None,
        }
    }

    pub fn topic(&self) -> &str {
        match self {
            Selection::NewCategory(n) => &n.topic,
            other => other.category().map(|id| id.as_str()).unwrap_or_default(),
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Selection::NewCategory(n) => &n.tags,
            other => other.as_match().map(|m| m.tags.as_slice()).unwrap_or_default(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Selection::NewCategory(n) => &n.title,
            other => other.as_match().map(|m| m.title.as_str()).unwrap_or_default(),
        }
    }

    pub fn is_new_category(&self) -> bool {
        matches!(self, Selection::NewCategory(_))
    }
}

impl ClassificationResult {
    pub fn topic(&self) -> &str {
        self.selection.topic()
    }

    pub fn tags(&self) -> &[String] {
        self.selection.tags()
    }

    pub fn title(&self) -> &str {
        self.selection.title()
    }

    pub fn summary(&self) -> TopicSummary {
        TopicSummary {
            topic: self.topic().to_string(),
            tags: self.tags().to_vec(),
            title: self.title().to_string(),
        }
    }

    /// Check the error/selection invariant against the active taxonomy.
    /// Returns a description of the first violation found.
    pub fn validate(&self, taxonomy: &Taxonomy) -> Result<(), String> {
        if self.title().trim().is_empty() {
            return Err("title cannot be empty".to_string());
        }

        match (&self.selection, self.error) {
            (Selection::NewCategory(proposal), true) => {
                if proposal.topic.trim().is_empty() {
                    return Err("new category proposal must name a topic".to_string());
                }
                Ok(())
            }
            (Selection::NewCategory(_), false) => Err(
                "new category proposal returned without the error flag set".to_string(),
            ),
            (selection, true) => Err(format!(
                "error flag set but predefined category '{}' was selected",
                selection.topic()
            )),
            (selection, false) => match selection.category() {
                Some(id) if taxonomy.contains(id) => Ok(()),
                _ => Err(format!(
                    "category '{}' is not part of the active taxonomy (expected one of: {:?})",
                    selection.topic(),
                    taxonomy.topics()
                )),
            },
        }
    }
}
