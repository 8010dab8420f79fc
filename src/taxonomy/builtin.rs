// src/taxonomy/builtin.rs

use super::{Category, CategoryId};

fn category(topic: CategoryId, description: &str, tags: &[&str], examples: &[&str]) -> Category {
    Category {
        topic,
        description: description.to_string(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
        potential_tags: tags.iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn categories() -> Vec<Category> {
    vec![
        category(
            CategoryId::LanguageUnderstanding,
            "Interpreting existing text: sentiment, classification, topic identification and toxicity detection.",
            &[
                "sentiment_analysis",
                "text_classification",
                "topic_identification",
                "toxicity_detection",
            ],
            &[
                "I just read this user review and I'm curious what you think the overall sentiment is?",
                "I have this article that needs to be categorized. Could you help me figure out which of the predefined categories it belongs to?",
                "I'm trying to get the gist of this paragraph. What would you say is the main topic or subject it's discussing?",
                "Can you take a look at this social media post and let me know if you spot any language that comes across as toxic or offensive?",
            ],
        ),
        category(
            CategoryId::LanguageGeneration,
            "Producing new text: summaries, creative writing, simplification and dialogue.",
            &[
                "text_summarization",
                "creative_writing",
                "simplification",
                "dialogue_generation",
            ],
            &[
                "I have a long article here that I need to get the key points from. Could you give me a concise summary in just a few sentences?",
                "I'd love to get my creative juices flowing. Can you write me an engaging short story based on this writing prompt I have?",
                "This legal document is full of complex jargon. Would you mind rephrasing it in plain, easy-to-understand terms for me?",
                "I'm trying to imagine how people would discuss current events. Could you create a sample dialogue between two characters talking about a recent news story?",
            ],
        ),
        category(
            CategoryId::Reasoning,
            "Drawing conclusions: inference, step-by-step problem solving, causal analysis and decision making.",
            &[
                "inference",
                "problem_solving",
                "causal_analysis",
                "decision_making",
            ],
            &[
                "I've shared some key facts about the situation. What insights can you draw from them?",
                "This is a tricky logical reasoning puzzle. Can you walk me through how to approach solving it step-by-step?",
                "Let's look at this historical event more closely. How would you break down the causal relationships between what happened?",
                "I'm facing a real ethical dilemma here and I'm not sure what to do. Based on the details I provided, what do you think is the right path forward?",
            ],
        ),
        category(
            CategoryId::KnowledgeAndFactuality,
            "Recalling facts about history, health, science and politics.",
            &[
                "historical_events",
                "health_and_nutrition",
                "science_and_technology",
                "political_systems",
            ],
            &[
                "Provide a brief overview of the key events in World War II.",
                "What are the main components of a healthy diet according to nutritional guidelines?",
                "Explain the fundamental principles of quantum mechanics in simple terms.",
                "Compare and contrast the features of capitalism and socialism.",
            ],
        ),
        category(
            CategoryId::Multilingualism,
            "Working across languages: translation, language identification, teaching and grammar.",
            &[
                "translation",
                "language_identification",
                "language_learning",
                "grammar_and_structure",
            ],
            &[
                "Translate this English sentence into French, German, and Italian.",
                "Identify the language of this user input and provide an appropriate response in the same language.",
                "Generate a language learning lesson to teach basic vocabulary in Mandarin Chinese.",
                "Explain the main grammatical differences between English and Japanese sentence structures.",
            ],
        ),
    ]
}
