/*!
 * Tests for the document translation stage
 */

use subburn::errors::TranslationError;
use subburn::providers::{MockBehavior, MockProvider};
use subburn::subtitle_processor::{SubtitleDocument, SubtitleEntry};
use subburn::translation::{translate_document, translated_output_path};

use crate::common;

#[tokio::test]
async fn test_translate_document_withWorkingProvider_shouldPreserveStructure() {
    let doc = common::sample_document();
    let provider = MockProvider::working();

    let translated = translate_document(&doc, "en", "it", &provider, 2)
        .await
        .unwrap();

    assert_eq!(translated.len(), doc.len());
    for (before, after) in doc.entries.iter().zip(translated.entries.iter()) {
        assert_eq!(after.index, before.index);
        assert_eq!(after.start, before.start);
        assert_eq!(after.end, before.end);
        assert_eq!(after.text, format!("[it] {}", before.text));
    }
    assert_eq!(provider.calls(), doc.len());
}

#[tokio::test]
async fn test_translate_document_withMultiLineEntry_shouldJoinBeforeTranslating() {
    let doc = SubtitleDocument {
        entries: vec![SubtitleEntry::new(
            1,
            0.0,
            2.0,
            "first line\nsecond line".to_string(),
        )],
    };
    let provider = MockProvider::working();

    let translated = translate_document(&doc, "en", "fr", &provider, 1)
        .await
        .unwrap();
    assert_eq!(translated.entries[0].text, "[fr] first line second line");
}

#[tokio::test]
async fn test_translate_document_withStaggeredCompletions_shouldKeepDocumentOrder() {
    // Earlier calls finish last; output order must still follow the input
    let doc = common::sample_document();
    let provider = MockProvider::new(MockBehavior::Staggered {
        start_ms: 80,
        step_ms: 20,
    });

    let translated = translate_document(&doc, "en", "es", &provider, doc.len())
        .await
        .unwrap();

    let indices: Vec<usize> = translated.entries.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![1, 2, 3, 4]);
    assert_eq!(translated.entries[0].text, "[es] First line");
    assert_eq!(translated.entries[3].text, "[es] Fourth line");
}

#[tokio::test]
async fn test_translate_document_withFailingProvider_shouldDiscardEverything() {
    let doc = common::sample_document();
    let provider = MockProvider::failing();

    let result = translate_document(&doc, "en", "it", &provider, 2).await;
    assert!(matches!(result, Err(TranslationError::Entry { .. })));
}

#[tokio::test]
async fn test_translate_document_withLateFailure_shouldNameFailingEntry() {
    let doc = common::sample_document();
    let provider = MockProvider::new(MockBehavior::FailOn { call: 3 });

    let result = translate_document(&doc, "en", "it", &provider, 1).await;
    match result {
        Err(TranslationError::Entry { index, .. }) => assert_eq!(index, 3),
        other => panic!("expected entry failure, got {:?}", other.map(|d| d.len())),
    }
}

#[tokio::test]
async fn test_translate_document_withEmptyDocument_shouldSucceed() {
    let doc = SubtitleDocument::new();
    let provider = MockProvider::working();

    let translated = translate_document(&doc, "en", "it", &provider, 2)
        .await
        .unwrap();
    assert!(translated.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_translated_output_path_withSrtInput_shouldSuffixLanguage() {
    let output = translated_output_path(std::path::Path::new("/tmp/movie.srt"), "it").unwrap();
    assert_eq!(output, std::path::PathBuf::from("/tmp/movie_it.srt"));
}
