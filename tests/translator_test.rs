mod common;

use common::{init_tracing, MockTranslator};
use news_autopost::{Entry, EntryTranslator, PipelineError};

fn entry_with_summary(title: &str, summary: &str) -> Entry {
    Entry {
        title: title.to_string(),
        link: "https://example.com/a".to_string(),
        published: "Mon, 01 Jan 2024 09:30:00 +0000".to_string(),
        summary: summary.to_string(),
        author: "Rio".to_string(),
        source: "Daily Riddim".to_string(),
        category: "uk_afrobeats".to_string(),
        ..Entry::default()
    }
}

#[tokio::test]
async fn translation_adds_counterparts_and_preserves_originals() {
    init_tracing();

    let translator = EntryTranslator::new(Box::new(MockTranslator::new()));

    let original = entry_with_summary("New single out", "Big tune.");
    let translated = translator.translate_entry(&original).await.unwrap();

    assert_eq!(translated.title_ja.as_deref(), Some("New single outの日本語訳"));
    assert_eq!(translated.summary_ja.as_deref(), Some("Big tune.の日本語訳"));

    // Every original field is untouched.
    assert_eq!(translated.title, original.title);
    assert_eq!(translated.link, original.link);
    assert_eq!(translated.published, original.published);
    assert_eq!(translated.summary, original.summary);
    assert_eq!(translated.author, original.author);
    assert_eq!(translated.source, original.source);
    assert_eq!(translated.category, original.category);
}

#[tokio::test]
async fn empty_fields_skip_the_backend() {
    init_tracing();

    let mock = MockTranslator::new();
    let calls = mock.calls.clone();
    let translator = EntryTranslator::new(Box::new(mock));

    let translated = translator
        .translate_entry(&entry_with_summary("Headline", ""))
        .await
        .unwrap();

    assert_eq!(translated.summary_ja.as_deref(), Some(""));
    // Only the title went to the backend; the empty summary never did.
    assert_eq!(*calls.lock().unwrap(), vec!["Headline".to_string()]);
}

#[tokio::test]
async fn batch_translation_is_all_or_nothing() {
    init_tracing();

    let mock = MockTranslator::failing_on("Second");
    let calls = mock.calls.clone();
    let translator = EntryTranslator::new(Box::new(mock));

    let entries = vec![
        entry_with_summary("First", "s1"),
        entry_with_summary("Second", "s2"),
        entry_with_summary("Third", "s3"),
    ];

    let result = translator.translate_entries(&entries).await;
    assert!(matches!(result, Err(PipelineError::Translation(_))));

    // The failure stopped the batch: the third entry was never attempted.
    let seen = calls.lock().unwrap();
    assert!(seen.contains(&"First".to_string()));
    assert!(seen.contains(&"Second".to_string()));
    assert!(!seen.contains(&"Third".to_string()));
}
