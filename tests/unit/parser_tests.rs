/*!
 * Tests for SRT parsing and the document model
 */

use srtproc::{SrtParser, TimeCode};
use srtproc::errors::ParseError;

/// Test timestamp parsing and formatting
#[test]
fn test_time_code_parsing_withValidLine_shouldParseAndFormat() {
    let tc = TimeCode::parse_line("01:23:45,678 --> 01:23:50,000", 2).unwrap();
    assert_eq!(tc.start_ms, 5_025_678);
    assert_eq!(tc.end_ms, 5_030_000);
    assert_eq!(TimeCode::format_timestamp(5_025_678), "01:23:45,678");
    assert_eq!(tc.to_string(), "01:23:45,678 --> 01:23:50,000");
}

/// Test time code rejection of out-of-range fields
#[test]
fn test_time_code_parsing_withOutOfRangeSeconds_shouldFail() {
    let result = TimeCode::parse_line("00:00:61,000 --> 00:01:05,000", 2);
    assert!(matches!(result, Err(ParseError::TimeOutOfRange { line: 2, .. })));
}

/// Test parsing a well-formed document
#[test]
fn test_parse_withWellFormedContent_shouldReturnAllBlocks() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nFirst line\nSecond line\n\n2\n00:00:05,000 --> 00:00:08,000\nAnother block\n";
    let document = SrtParser::parse(content).unwrap();

    assert_eq!(document.total_blocks(), 2);
    assert_eq!(document.blocks[0].index, 1);
    assert_eq!(document.blocks[0].lines, vec!["First line", "Second line"]);
    assert_eq!(document.blocks[1].time_code.start_ms, 5000);
}

/// Test that a bare numeric dialogue line is not mistaken for an index
#[test]
fn test_parse_withNumericDialogueLine_shouldKeepItInBlock() {
    // "2" here is subtitle text, not the next block's index, because the
    // following line is not a time code line.
    let content = "1\n00:00:01,000 --> 00:00:04,000\nHow many?\n2\n\n2\n00:00:05,000 --> 00:00:08,000\nThat many.\n";
    let document = SrtParser::parse(content).unwrap();

    assert_eq!(document.total_blocks(), 2);
    assert_eq!(document.blocks[0].lines, vec!["How many?", "2"]);
    assert_eq!(document.blocks[1].lines, vec!["That many."]);
}

/// Test parse failure on a malformed time code line
#[test]
fn test_parse_withBadTimeCode_shouldReturnError() {
    let content = "1\n00:00:01.000 -> 00:00:04,000\nText\n";
    let result = SrtParser::parse(content);
    assert!(matches!(result, Err(ParseError::InvalidTimeCode { .. })));
}

/// Test parse failure on a block with no text
#[test]
fn test_parse_withEmptyBlock_shouldReturnError() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\n\n2\n00:00:05,000 --> 00:00:08,000\nText\n";
    let result = SrtParser::parse(content);
    assert!(matches!(result, Err(ParseError::EmptyBlock { .. })));
}

/// Test that serialization round-trips through parse
#[test]
fn test_to_srt_string_withParsedDocument_shouldRoundTrip() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nHello there\n\n2\n00:00:05,000 --> 00:00:08,000\n- Hi\n- Hello\n";
    let document = SrtParser::parse(content).unwrap();
    let rendered = document.to_srt_string();
    let reparsed = SrtParser::parse(&rendered).unwrap();

    assert_eq!(reparsed.total_blocks(), document.total_blocks());
    assert_eq!(reparsed.blocks[1].lines, vec!["- Hi", "- Hello"]);
}

/// Test format validation reporting without failing
#[test]
fn test_validate_format_withIndexGap_shouldReportIssue() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nText\n\n5\n00:00:05,000 --> 00:00:08,000\nMore text\n";
    let issues = SrtParser::validate_format(content);
    assert!(!issues.is_empty());
    assert!(issues.iter().any(|issue| issue.contains("5")));
}

/// Test reading speed computation on a parsed block
#[test]
fn test_reading_speed_withKnownDuration_shouldDivideBySeconds() {
    let content = "1\n00:00:00,000 --> 00:00:02,000\nabcdefghij\nabcdefghij\n";
    let document = SrtParser::parse(content).unwrap();
    // 20 characters over 2 seconds
    assert!((document.blocks[0].reading_speed() - 10.0).abs() < f64::EPSILON);
}

/// Test SDH block removal and marker cleaning
#[test]
fn test_remove_sdh_withMixedDocument_shouldDropAndRenumber() {
    let content = "1\n00:00:01,000 --> 00:00:03,000\n[door slams]\n\n2\n00:00:04,000 --> 00:00:06,000\n(sighs) I'm home\n\n3\n00:00:07,000 --> 00:00:09,000\n♪♪\n";
    let document = SrtParser::parse(content).unwrap();
    let cleaned = document.remove_sdh_blocks_and_clean();

    // SDH-only blocks dropped, the mixed one kept with markers stripped
    assert_eq!(cleaned.total_blocks(), 1);
    assert_eq!(cleaned.blocks[0].index, 1);
    assert_eq!(cleaned.blocks[0].lines, vec!["I'm home"]);
}
