// src/prompt/builder.rs

use crate::llm::ChatMessage;
use crate::taxonomy::Taxonomy;

pub const SYSTEM_PROMPT: &str =
    "You are an AI assistant that can classify conversations into categories.";

/// Builds the user instruction embedding the capabilities and the conversation
pub fn build_classification_prompt(taxonomy: &Taxonomy, conversation: &str) -> String {
    let capabilities = serde_json::to_string_pretty(&taxonomy.to_prompt_json())
        .unwrap_or_else(|_| taxonomy.to_prompt_json().to_string());

    let mut prompt = String::new();

    // 1. Task
    prompt.push_str("Given the following conversation, classify it into one of the existing categories ");
    prompt.push_str("based on the nature of the interaction and the capabilities demonstrated by the AI assistant. ");
    prompt.push_str("If the conversation does not fit well into any of the predefined categories, ");
    prompt.push_str("suggest a new topic and relevant tags for the category. ");
    prompt.push_str("Additionally, provide a short title (less than 10 words) that summarizes the conversation.\n\n");

    // 2. Categories and conversation
    prompt.push_str("Existing Categories:\n<capabilities>\n");
    prompt.push_str(&capabilities);
    prompt.push_str("\n</capabilities>\n\n");
    prompt.push_str("Conversation:\n<conversation>\n");
    prompt.push_str(conversation.trim());
    prompt.push_str("\n</conversation>\n\n");

    // 3. Output shapes
    prompt.push_str("Explain your reasoning step by step in `chain_of_thought` before choosing.\n\n");
    prompt.push_str("If the conversation fits an existing category, set `error` to false and select that category's kind:\n");
    prompt.push_str("- tags: relevant tags from the matching category, new tags are allowed\n");
    prompt.push_str("- title: a short, descriptive and specific title in less than 10 words\n\n");
    prompt.push_str("If the conversation does not fit any existing category, set `error` to true and select `new_category`:\n");
    prompt.push_str("- message: why none of the existing categories apply\n");
    prompt.push_str("- topic: the proposed topic for the new category in snake_case\n");
    prompt.push_str("- tags: the proposed tags for the new category in snake_case\n");
    prompt.push_str("- title: a short, descriptive and specific title in less than 10 words\n");

    prompt
}

/// System + user messages for a single classification request
pub fn build_messages(taxonomy: &Taxonomy, conversation: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_classification_prompt(taxonomy, conversation)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_roles() {
        let messages = build_messages(&Taxonomy::builtin(), "Translate this please");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_prompt_embeds_taxonomy_and_conversation() {
        let prompt = build_classification_prompt(&Taxonomy::builtin(), "  What is 2+2?  ");

        assert!(prompt.contains("<conversation>\nWhat is 2+2?\n</conversation>"));
        for topic in Taxonomy::builtin().topics() {
            assert!(prompt.contains(topic), "prompt missing {}", topic);
        }
        assert!(prompt.contains("new_category"));
        assert!(prompt.contains("snake_case"));
    }

    #[test]
    fn test_prompt_only_lists_active_categories() {
        let taxonomy = Taxonomy::from_toml_str(
            r#"
            [[categories]]
            topic = "reasoning"
            description = "Logic"
            "#,
        )
        .unwrap();
        let prompt = build_classification_prompt(&taxonomy, "hi");

        assert!(prompt.contains("\"reasoning\""));
        assert!(!prompt.contains("\"multilingualism\""));
    }
}
