/*!
 * Tests for the subtitle document model
 */

use subburn::errors::ParseError;
use subburn::subtitle_processor::{SubtitleDocument, SubtitleEntry};
use subburn::transcribe::Segment;

use crate::common;

#[test]
fn test_from_segments_withTranscript_shouldNumberAndTrimEntries() {
    let doc = SubtitleDocument::from_segments(vec![
        Segment {
            start: 0.0,
            end: 2.0,
            text: "  padded text  ".to_string(),
        },
        Segment {
            start: 2.0,
            end: 4.0,
            text: "second".to_string(),
        },
    ]);

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.entries[0].index, 1);
    assert_eq!(doc.entries[0].text, "padded text");
    assert_eq!(doc.entries[1].index, 2);
    assert_eq!(doc.entries[1].start, 2.0);
}

#[test]
fn test_from_segments_withEmptyInput_shouldYieldEmptyDocument() {
    let doc = SubtitleDocument::from_segments(Vec::new());
    assert!(doc.is_empty());
    assert_eq!(doc.serialize(), "");
}

#[test]
fn test_serialize_withTwoSegments_shouldMatchGoldenOutput() {
    let doc = SubtitleDocument::from_segments(common::sample_segments());

    let expected = "1\n00:00:00,000 --> 00:00:01,500\nHello\n\n2\n00:00:01,500 --> 00:00:03,000\nworld\n";
    assert_eq!(doc.serialize(), expected);
}

#[test]
fn test_parse_withSerializedDocument_shouldRoundTrip() {
    let doc = common::sample_document();
    let parsed = SubtitleDocument::parse(&doc.serialize()).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn test_parse_withMultiLineEntry_shouldFlattenToSingleLine() {
    let doc = SubtitleDocument {
        entries: vec![SubtitleEntry::new(
            1,
            0.0,
            2.0,
            "first line\nsecond line".to_string(),
        )],
    };

    let parsed = SubtitleDocument::parse(&doc.serialize()).unwrap();
    assert_eq!(parsed.entries[0].text, "first line second line");
}

#[test]
fn test_parse_withCrlfLineEndings_shouldParse() {
    let content = "1\r\n00:00:00,000 --> 00:00:01,000\r\nHello\r\n\r\n2\r\n00:00:01,000 --> 00:00:02,000\r\nthere\r\n";
    let parsed = SubtitleDocument::parse(content).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.entries[1].text, "there");
}

#[test]
fn test_parse_withShortBlock_shouldFail() {
    let content = "1\n00:00:00,000 --> 00:00:01,000";
    assert!(matches!(
        SubtitleDocument::parse(content),
        Err(ParseError::TruncatedBlock { ordinal: 1 })
    ));
}

#[test]
fn test_parse_withBadIndexLine_shouldFail() {
    let content = "one\n00:00:00,000 --> 00:00:01,000\nHello\n";
    assert!(matches!(
        SubtitleDocument::parse(content),
        Err(ParseError::InvalidIndexLine { ordinal: 1, .. })
    ));
}

#[test]
fn test_parse_withBadTimestamp_shouldPropagateFormatError() {
    let content = "1\nbogus --> 00:00:01,000\nHello\n";
    assert!(matches!(
        SubtitleDocument::parse(content),
        Err(ParseError::Timestamp(_))
    ));
}

#[test]
fn test_parse_withMissingArrow_shouldFail() {
    let content = "1\n00:00:00,000 00:00:01,000\nHello\n";
    assert!(matches!(
        SubtitleDocument::parse(content),
        Err(ParseError::MissingTimestampLine { ordinal: 1 })
    ));
}

#[test]
fn test_file_roundtrip_withTempDir_shouldPreserveDocument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.srt");

    let doc = common::sample_document();
    doc.write_to_file(&path).unwrap();

    let read_back = SubtitleDocument::read_from_file(&path).unwrap();
    assert_eq!(read_back, doc);
}
