/*!
 * Tests for the per-language line engines through the public dispatch seam
 */

use srtproc::engine::{apply_line_engine, visible_length};
use srtproc::{Language, ProcessingConfig, SubtitleBlock, TimeCode};

fn block(lines: &[&str]) -> SubtitleBlock {
    SubtitleBlock::new(
        1,
        TimeCode::new(0, 4000),
        lines.iter().map(|s| s.to_string()).collect(),
    )
}

/// Test the visible-length counting rule per language
#[test]
fn test_visible_length_withSpaces_shouldFollowLanguageRule() {
    // Chinese and Japanese ignore ASCII spaces
    assert_eq!(visible_length(Language::Chinese, "你好 世界 朋友"), 6);
    assert_eq!(visible_length(Language::Japanese, "今日 は"), 3);
    // English and Korean count them
    assert_eq!(visible_length(Language::English, "hello world"), 11);
    assert_eq!(visible_length(Language::Korean, "안녕 하세요"), 6);
}

/// Test that a compliant block passes through every engine unchanged
#[test]
fn test_apply_line_engine_withCompliantBlock_shouldNotRewrite() {
    let config = ProcessingConfig::default();

    let en = apply_line_engine(Language::English, &config, &block(&["Short and sweet."]));
    assert_eq!(en.lines, vec!["Short and sweet."]);

    let zh = apply_line_engine(Language::Chinese, &config, &block(&["今天天气很好。"]));
    assert_eq!(zh.lines, vec!["今天天气很好。"]);
}

/// Test dialogue dash normalization on the way through an engine
#[test]
fn test_apply_line_engine_withRaggedDialogueDashes_shouldNormalize() {
    let config = ProcessingConfig::default();
    let input = block(&["-Ready to go?", "-  Almost there, yes."]);
    let output = apply_line_engine(Language::English, &config, &input);

    // Two speakers stay on separate lines, dashes renormalized
    assert_eq!(output.lines, vec!["- Ready to go?", "- Almost there, yes."]);
}

/// Test English breaking at sentence punctuation inside the search window
#[test]
fn test_apply_line_engine_withLongEnglishLine_shouldBreakAfterComma() {
    let config = ProcessingConfig::default();
    let input = block(&[
        "I went to the store yesterday afternoon, and I bought some fresh bread for us",
    ]);
    let output = apply_line_engine(Language::English, &config, &input);

    assert_eq!(output.lines.len(), 2);
    assert_eq!(output.lines[0], "I went to the store yesterday afternoon,");
    assert_eq!(output.lines[1], "and I bought some fresh bread for us");
}

/// Test Japanese particle breaking and terminal punctuation repair
#[test]
fn test_apply_line_engine_withLongJapaneseLine_shouldBreakAtParticle() {
    let config = ProcessingConfig::default();
    let input = block(&["私たちは今日公園で桜の花をゆっくり見ました"]);
    let output = apply_line_engine(Language::Japanese, &config, &input);

    assert_eq!(output.lines.len(), 2);
    for line in &output.lines {
        assert!(visible_length(Language::Japanese, line) <= 13);
    }
    assert!(output.lines.last().unwrap().ends_with('。'));
    // Content is preserved, only redistributed
    assert_eq!(
        output.lines.join("").trim_end_matches('。'),
        "私たちは今日公園で桜の花をゆっくり見ました"
    );
}

/// Test Korean space-first breaking keeps every line within the limit
#[test]
fn test_apply_line_engine_withLongKoreanLine_shouldBreakAtSpace() {
    let config = ProcessingConfig {
        no_punct_fix: true,
        ..ProcessingConfig::default()
    };
    let input = block(&["우리는오늘공원에서 친구들을만나서놀았어요"]);
    let output = apply_line_engine(Language::Korean, &config, &input);

    assert!(output.lines.len() >= 2);
    assert_eq!(output.lines[0], "우리는오늘공원에서");
    for line in &output.lines {
        assert!(visible_length(Language::Korean, line) <= 16);
    }
}

/// Test that the engine only touches lines, never timing or index
#[test]
fn test_apply_line_engine_withAnyBlock_shouldPreserveTimingAndIndex() {
    let config = ProcessingConfig::default();
    let input = SubtitleBlock::new(
        7,
        TimeCode::new(1500, 5500),
        vec!["A reasonably short line.".to_string()],
    );
    let output = apply_line_engine(Language::English, &config, &input);

    assert_eq!(output.index, 7);
    assert_eq!(output.time_code, TimeCode::new(1500, 5500));
}
