/*!
 * Tests for the annotated violation SRT export
 */

use std::path::Path;

use srtproc::report::{default_violation_path, render_violation_srt};
use srtproc::{ProcessingConfig, SrtParser, Validator};

/// Test default violation path derivation
#[test]
fn test_default_violation_path_withSrtInput_shouldAppendSuffix() {
    let path = default_violation_path(Path::new("/data/movie.srt"));
    assert_eq!(path, Path::new("/data/movie-violation.srt"));

    let bare = default_violation_path(Path::new("episode"));
    assert_eq!(bare, Path::new("episode-violation.srt"));
}

/// Test the rendered report structure on a violating document
#[test]
fn test_render_violation_srt_withViolations_shouldAnnotateBlocks() {
    let long = "abcdefghij abcdefghij abcdefghij abcdefghij a";
    let content = format!(
        "1\n00:00:00,000 --> 00:00:10,000\nAll good here\n\n2\n00:00:11,000 --> 00:00:21,000\n{long}\n"
    );
    let document = SrtParser::parse(&content).unwrap();
    let report = Validator::new(ProcessingConfig::default()).validate(&document);
    let rendered = render_violation_srt(&document, &report, true);

    // Summary header block
    assert!(rendered.starts_with("1\n00:00:00,000 --> 00:00:05,000\n=== VIOLATION ANALYSIS SUMMARY ==="));
    assert!(rendered.contains("Compliance: 50.0% (1/2 blocks)"));
    assert!(rendered.contains("⚠️ Total Violations: 1"));
    assert!(rendered.contains("📊 Character Limit: 1 violations"));
    assert!(rendered.contains("⏱️ Reading Speed: 0 violations"));

    // Only the violating block is exported, with its source time code
    assert!(rendered.contains("00:00:11,000 --> 00:00:21,000"));
    assert!(!rendered.contains("All good here"));
    assert!(rendered.contains("# VIOLATIONS: Line 1 character limit (45 > 42 en)"));
    assert!(rendered.contains(long));
}

/// Test that the speed section is omitted when speed checking is off
#[test]
fn test_render_violation_srt_withSpeedCheckDisabled_shouldOmitSpeedLine() {
    let long = "abcdefghij abcdefghij abcdefghij abcdefghij a";
    let content = format!("1\n00:00:00,000 --> 00:00:10,000\n{long}\n");
    let document = SrtParser::parse(&content).unwrap();
    let config = ProcessingConfig {
        no_speed_check: true,
        ..ProcessingConfig::default()
    };
    let report = Validator::new(config).validate(&document);
    let rendered = render_violation_srt(&document, &report, false);

    assert!(!rendered.contains("⏱️ Reading Speed"));
    assert!(rendered.contains("# VIOLATIONS:"));
}
