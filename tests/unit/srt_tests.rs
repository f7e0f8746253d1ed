/*!
 * Tests for SRT parsing and generation
 */

use anyhow::Result;
use subglot::srt::{SubtitleDocument, SubtitleEntry};
use crate::common;

/// Test parsing a simple two-entry document
#[test]
fn test_parse_withValidContent_shouldParseCorrectly() {
    let content = "1\n00:00:01,000 --> 00:00:02,500\nこんにちは\n\n2\n00:00:03,000 --> 00:00:04,000\nさようなら";

    let document = SubtitleDocument::parse(content);

    assert_eq!(document.len(), 2);

    assert_eq!(document.entries[0].id, 1);
    assert_eq!(document.entries[0].start_time, "00:00:01,000");
    assert_eq!(document.entries[0].end_time, "00:00:02,500");
    assert_eq!(document.entries[0].text, "こんにちは");

    assert_eq!(document.entries[1].id, 2);
    assert_eq!(document.entries[1].start_time, "00:00:03,000");
    assert_eq!(document.entries[1].end_time, "00:00:04,000");
    assert_eq!(document.entries[1].text, "さようなら");
}

/// Test generating SRT text from entries
#[test]
fn test_generate_withTwoEntries_shouldEmitExactText() {
    let document = SubtitleDocument {
        entries: vec![
            SubtitleEntry::new(1, "00:00:01,000", "00:00:02,500", "こんにちは"),
            SubtitleEntry::new(2, "00:00:03,000", "00:00:04,000", "さようなら"),
        ],
    };

    let expected = "1\n00:00:01,000 --> 00:00:02,500\nこんにちは\n\n2\n00:00:03,000 --> 00:00:04,000\nさようなら\n\n";
    assert_eq!(document.to_srt_string(), expected);
}

/// Test the round-trip law: parse(generate(E)) == E
#[test]
fn test_roundTrip_withWellFormedEntries_shouldReproduceEntries() {
    let document = SubtitleDocument {
        entries: vec![
            SubtitleEntry::new(1, "00:00:01,000", "00:00:02,500", "First line"),
            // Multi-line text with embedded newline
            SubtitleEntry::new(2, "00:00:03,000", "00:00:04,000", "Second entry\nwith two lines"),
            // Ids are not required to be contiguous
            SubtitleEntry::new(7, "00:01:00,000", "00:01:02,000", "Gap in numbering"),
            // Order is preserved even when timestamps go backwards
            SubtitleEntry::new(8, "00:00:30,000", "00:00:31,000", "Earlier timestamp, later block"),
        ],
    };

    let reparsed = SubtitleDocument::parse(&document.to_srt_string());
    assert_eq!(reparsed, document);
}

/// Test that a missing timing separator yields an empty document
#[test]
fn test_parse_withMissingTimingSeparator_shouldYieldEmptyDocument() {
    let content = "1\n00:00:01,000 00:00:02,500\nHello";

    let document = SubtitleDocument::parse(content);
    assert!(document.is_empty());
}

/// Test that malformed blocks are dropped while valid blocks survive
#[test]
fn test_parse_withMixedValidity_shouldDropOnlyMalformedBlocks() {
    let content = "\
not-a-number
00:00:01,000 --> 00:00:02,000
Dropped because the id is not an integer

2
00:00:03,000 --> 00:00:04,000
Kept

3
bad timing line
Dropped because the timing regex fails

4
00:00:05,000 --> 00:00:06,000
Also kept";

    let document = SubtitleDocument::parse(content);

    assert_eq!(document.len(), 2);
    assert_eq!(document.entries[0].id, 2);
    assert_eq!(document.entries[0].text, "Kept");
    assert_eq!(document.entries[1].id, 4);
    assert_eq!(document.entries[1].text, "Also kept");
}

/// Test that a block with fewer than three lines is dropped
#[test]
fn test_parse_withTwoLineBlock_shouldDropBlock() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nText";

    let document = SubtitleDocument::parse(content);

    assert_eq!(document.len(), 1);
    assert_eq!(document.entries[0].id, 2);
}

/// Test CRLF and surrounding whitespace normalization
#[test]
fn test_parse_withCrlfLineEndings_shouldNormalize() {
    let content = "\r\n1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nWorld\r\n";

    let document = SubtitleDocument::parse(content);

    assert_eq!(document.len(), 2);
    assert_eq!(document.entries[0].text, "Hello");
    assert_eq!(document.entries[1].text, "World");
}

/// Test that multiple blank lines separate blocks just like a single one
#[test]
fn test_parse_withMultipleBlankLines_shouldSplitBlocks() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nOne\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nTwo";

    let document = SubtitleDocument::parse(content);
    assert_eq!(document.len(), 2);
}

/// Test that entries keep their source order and ids without renumbering
#[test]
fn test_parse_withNonContiguousIds_shouldPreserveOrderAndIds() {
    let content = "10\n00:00:05,000 --> 00:00:06,000\nTen\n\n3\n00:00:01,000 --> 00:00:02,000\nThree";

    let document = SubtitleDocument::parse(content);

    assert_eq!(document.len(), 2);
    assert_eq!(document.entries[0].id, 10);
    assert_eq!(document.entries[1].id, 3);
}

/// Test rebuilding a document with replacement texts
#[test]
fn test_withTexts_withMatchingLength_shouldKeepIdsAndTimings() -> Result<()> {
    let document = SubtitleDocument::parse("1\n00:00:01,000 --> 00:00:02,000\nこんにちは");
    let translated = document.with_texts(&["Hello".to_string()])?;

    assert_eq!(translated.entries[0].id, 1);
    assert_eq!(translated.entries[0].start_time, "00:00:01,000");
    assert_eq!(translated.entries[0].end_time, "00:00:02,000");
    assert_eq!(translated.entries[0].text, "Hello");
    Ok(())
}

/// Test that a length mismatch on rebuild is rejected
#[test]
fn test_withTexts_withLengthMismatch_shouldFail() {
    let document = SubtitleDocument::parse("1\n00:00:01,000 --> 00:00:02,000\nHello");
    let result = document.with_texts(&[]);
    assert!(result.is_err());
}

/// Test file round-trip through the filesystem
#[test]
fn test_fileRoundTrip_withTestSubtitle_shouldReproduceEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "test.srt")?;

    let document = SubtitleDocument::from_file(&path)?;
    assert_eq!(document.len(), 3);
    assert_eq!(document.entries[0].text, "This is a test subtitle.");

    let out_path = temp_dir.path().join("out.srt");
    document.write_to_file(&out_path)?;
    let reread = SubtitleDocument::from_file(&out_path)?;
    assert_eq!(reread, document);
    Ok(())
}

/// Test parsing entirely empty input
#[test]
fn test_parse_withEmptyInput_shouldYieldEmptyDocument() {
    assert!(SubtitleDocument::parse("").is_empty());
    assert!(SubtitleDocument::parse("   \n\n  ").is_empty());
}
