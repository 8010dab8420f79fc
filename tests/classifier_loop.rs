// tests/classifier_loop.rs
// Retry behaviour of the classification loop against a scripted backend


use std::sync::Arc;

use serde_json::json;
use test_helpers::{matched, unclassified, Reply, ScriptedCompletion, ARTICLE_CONVERSATION};
use topic_classifier::{CategoryId, ClassifyError, Classifier, RetryPolicy, Taxonomy};

fn classifier(backend: &Arc<ScriptedCompletion>) -> Classifier {
    Classifier::new(backend.clone(), Taxonomy::builtin())
}

#[tokio::test]
async fn test_article_classified_on_first_attempt() {
    let backend = Arc::new(ScriptedCompletion::always(matched(
        "language_understanding",
        &["text_classification"],
        "Categorizing an article",
    )));

    let result = classifier(&backend)
        .classify(ARTICLE_CONVERSATION)
        .await
        .unwrap();

    assert_eq!(backend.calls(), 1);
    assert!(!result.error);
    assert_eq!(
        result.selection.category(),
        Some(CategoryId::LanguageUnderstanding)
    );
    assert_eq!(result.topic(), "language_understanding");
    assert_eq!(result.title(), "Categorizing an article");

    let messages = backend.last_messages().unwrap();
    assert_eq!(messages[0].role, "system");
    assert!(messages[1].content.contains(ARTICLE_CONVERSATION));
}

#[tokio::test]
async fn test_recovers_after_two_failures() {
    let backend = Arc::new(ScriptedCompletion::new(vec![
        Reply::Fail("connection reset"),
        Reply::Fail("timeout"),
        Reply::Value(matched("reasoning", &["problem_solving"], "Logic puzzle walkthrough")),
    ]));

    let result = classifier(&backend).classify("Help me solve this puzzle").await.unwrap();

    assert_eq!(backend.calls(), 3);
    assert_eq!(result.topic(), "reasoning");
}

#[tokio::test]
async fn test_propagates_after_exactly_three_failures() {
    let backend = Arc::new(ScriptedCompletion::new(vec![
        Reply::Fail("first"),
        Reply::Fail("second"),
        Reply::Fail("rate limited"),
        Reply::Value(matched("reasoning", &[], "Never reached")),
    ]));

    let err = classifier(&backend).classify("anything").await.unwrap_err();

    assert_eq!(backend.calls(), 3);
    match &err {
        ClassifyError::Exhausted { attempts, last } => {
            assert_eq!(*attempts, 3);
            assert!(matches!(**last, ClassifyError::Completion(_)));
            assert!(last.to_string().contains("rate limited"));
        }
        other => panic!("expected Exhausted, got {:?}", other),
    }
    assert!(matches!(err.last_error(), ClassifyError::Completion(_)));
}

#[tokio::test]
async fn test_stops_as_soon_as_classified() {
    for k in 1..=3usize {
        let mut script: Vec<Reply> = (1..k).map(|_| Reply::Fail("transient")).collect();
        script.push(Reply::Value(matched("multilingualism", &["translation"], "French translation")));
        script.push(Reply::Value(matched("reasoning", &[], "Should not be used")));
        let backend = Arc::new(ScriptedCompletion::new(script));

        let result = classifier(&backend).classify("Translate this").await.unwrap();

        assert_eq!(backend.calls(), k, "success on attempt {}", k);
        assert_eq!(result.topic(), "multilingualism");
    }
}

#[tokio::test]
async fn test_malformed_and_invalid_outputs_are_retried() {
    let backend = Arc::new(ScriptedCompletion::new(vec![
        // not the schema at all
        Reply::Value(json!({"topic": "reasoning"})),
        // error flag without a new-category proposal
        Reply::Value(json!({
            "chain_of_thought": "",
            "error": true,
            "selection": {"kind": "reasoning", "tags": [], "title": "Puzzle"}
        })),
        Reply::Value(matched("reasoning", &["inference"], "Drawing conclusions from facts")),
    ]));

    let result = classifier(&backend).classify("What can you infer?").await.unwrap();

    assert_eq!(backend.calls(), 3);
    assert_eq!(result.topic(), "reasoning");
}

#[tokio::test]
async fn test_final_malformed_output_is_fatal() {
    let backend = Arc::new(ScriptedCompletion::always(json!({"nonsense": true})));

    let err = classifier(&backend).classify("hello").await.unwrap_err();

    assert_eq!(backend.calls(), 3);
    assert!(matches!(err.last_error(), ClassifyError::Malformed(_)));
}

#[tokio::test]
async fn test_unclassified_results_are_retried() {
    let backend = Arc::new(ScriptedCompletion::new(vec![
        Reply::Value(unclassified("cooking", "Sourdough starter help")),
        Reply::Value(matched("knowledge_and_factuality", &["health_and_nutrition"], "Healthy bread choices")),
    ]));

    let result = classifier(&backend).classify("Is sourdough healthy?").await.unwrap();

    assert_eq!(backend.calls(), 2);
    assert!(!result.error);
    assert_eq!(result.topic(), "knowledge_and_factuality");
}

#[tokio::test]
async fn test_returns_last_unclassified_when_attempts_run_out() {
    let backend = Arc::new(ScriptedCompletion::new(vec![
        Reply::Value(unclassified("cooking", "Bread")),
        Reply::Fail("flaky"),
        Reply::Value(unclassified("baking", "Sourdough starter help")),
    ]));

    let result = classifier(&backend).classify("My starter won't rise").await.unwrap();

    assert_eq!(backend.calls(), 3);
    assert!(result.error);
    assert!(result.selection.is_new_category());
    assert_eq!(result.topic(), "baking");
}

#[tokio::test]
async fn test_final_failure_wins_over_earlier_unclassified() {
    let backend = Arc::new(ScriptedCompletion::new(vec![
        Reply::Value(unclassified("cooking", "Bread")),
        Reply::Value(unclassified("cooking", "Bread")),
        Reply::Fail("gateway timeout"),
    ]));

    let err = classifier(&backend).classify("bread?").await.unwrap_err();

    assert_eq!(backend.calls(), 3);
    assert!(err.to_string().contains("gateway timeout"));
}

#[tokio::test]
async fn test_custom_attempt_cap() {
    let backend = Arc::new(ScriptedCompletion::new(vec![]));

    let err = classifier(&backend)
        .with_policy(RetryPolicy::new(5))
        .classify("hello")
        .await
        .unwrap_err();

    assert_eq!(backend.calls(), 5);
    assert!(matches!(err, ClassifyError::Exhausted { attempts: 5, .. }));
}

#[tokio::test]
async fn test_category_outside_loaded_taxonomy_is_rejected() {
    let taxonomy = Taxonomy::from_toml_str(
        r#"
        [[categories]]
        topic = "reasoning"
        description = "Logic"
        "#,
    )
    .unwrap();
    let backend = Arc::new(ScriptedCompletion::always(matched(
        "multilingualism",
        &["translation"],
        "Translate to French",
    )));

    let err = Classifier::new(backend.clone(), taxonomy)
        .classify("Translate this")
        .await
        .unwrap_err();

    assert_eq!(backend.calls(), 3);
    assert!(matches!(err.last_error(), ClassifyError::Invalid(_)));
}

#[tokio::test]
async fn test_deterministic_backend_gives_identical_results() {
    let backend = Arc::new(ScriptedCompletion::always(matched(
        "language_generation",
        &["text_summarization"],
        "Summarizing a long article",
    )));
    let classifier = classifier(&backend);

    let first = classifier.classify("Summarize this").await.unwrap();
    let second = classifier.classify("Summarize this").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(backend.calls(), 2);
}

#[tokio::test]
async fn test_successful_topics_come_from_taxonomy() {
    let taxonomy = Taxonomy::builtin();
    for id in CategoryId::ALL {
        let backend = Arc::new(ScriptedCompletion::always(matched(id.as_str(), &[], "A title")));
        let result = classifier(&backend).classify("text").await.unwrap();

        assert!(!result.error);
        assert!(taxonomy.topics().iter().any(|t| *t == result.topic()));
    }
}
