/*!
 * Script-distribution language classification.
 *
 * Scores Unicode-script counts (Han, Hangul, kana, Latin) plus
 * language-specific punctuation over a text sample to pick one of the
 * supported languages. The same scorer runs at three granularities
 * (whole document, single block, single line), which is what makes
 * per-line overrides for mixed-language documents possible.
 */

use crate::app_config::Language;
use crate::subtitle::{SrtDocument, SubtitleBlock};

// Punctuation sets per language. Chinese and Korean subtitles share the
// same full-width set; Japanese adds the ideographic comma and angle
// brackets.
const CHINESE_PUNCT: &[char] = &[
    '。', '！', '？', '，', '：', '“', '”', '（', '）', '【', '】', '《', '》',
];
const KOREAN_PUNCT: &[char] = &[
    '。', '！', '？', '，', '：', '“', '”', '（', '）', '【', '】', '《', '》',
];
const JAPANESE_PUNCT: &[char] = &[
    '。', '！', '？', '、', '：', '“', '”', '（', '）', '【', '】', '《', '》', '〈', '〉',
];

// Scores below this are noise and floor to zero.
const MIN_SCORE: f64 = 0.01;

/// Script character counts over a text sample.
#[derive(Debug, Default, Clone, Copy)]
struct ScriptCounts {
    han: usize,
    hangul: usize,
    hiragana: usize,
    katakana: usize,
    latin: usize,
    chinese_punct: usize,
    korean_punct: usize,
    japanese_punct: usize,
    /// All non-whitespace code points
    total: usize,
}

fn count_scripts(text: &str) -> ScriptCounts {
    let mut counts = ScriptCounts::default();

    for c in text.chars() {
        if !c.is_whitespace() {
            counts.total += 1;
        }

        match c {
            '\u{4e00}'..='\u{9fff}' => counts.han += 1,
            '\u{ac00}'..='\u{d7af}' => counts.hangul += 1,
            '\u{3040}'..='\u{309f}' => counts.hiragana += 1,
            '\u{30a0}'..='\u{30ff}' => counts.katakana += 1,
            'a'..='z' | 'A'..='Z' => counts.latin += 1,
            _ => {}
        }

        if CHINESE_PUNCT.contains(&c) {
            counts.chinese_punct += 1;
        }
        if KOREAN_PUNCT.contains(&c) {
            counts.korean_punct += 1;
        }
        if JAPANESE_PUNCT.contains(&c) {
            counts.japanese_punct += 1;
        }
    }

    counts
}

// Weighted confidence score for each candidate language, in declaration
// order (Language::ALL).
fn language_scores(counts: ScriptCounts) -> [(Language, f64); 4] {
    let total = counts.total.max(1) as f64;

    let han_ratio = counts.han as f64 / total;
    let hangul_ratio = counts.hangul as f64 / total;
    let kana_ratio = (counts.hiragana + counts.katakana) as f64 / total;
    let latin_ratio = counts.latin as f64 / total;
    let cjk_ratio =
        (counts.han + counts.hangul + counts.hiragana + counts.katakana) as f64 / total;

    let chinese = han_ratio * 10.0 + (counts.chinese_punct as f64 / total) * 2.0;

    // A few romanized proper nouns inside a CJK-dominant line must not
    // win, hence the reduced weight once CJK passes 10%.
    let english = if cjk_ratio < 0.1 {
        latin_ratio * 10.0
    } else {
        latin_ratio * 2.0
    };

    let korean = hangul_ratio * 10.0 + (counts.korean_punct as f64 / total) * 2.0;

    // Japanese text is commonly a kana/kanji mixture, so Han counts at
    // half weight.
    let japanese = (kana_ratio + han_ratio * 0.5) * 10.0
        + (counts.japanese_punct as f64 / total) * 2.0;

    let floor = |score: f64| if score < MIN_SCORE { 0.0 } else { score };

    [
        (Language::Chinese, floor(chinese)),
        (Language::English, floor(english)),
        (Language::Korean, floor(korean)),
        (Language::Japanese, floor(japanese)),
    ]
}

// Winner takes the max score; ties resolve to the earlier candidate in
// declaration order.
fn best_language(scores: [(Language, f64); 4]) -> Language {
    let mut winner = scores[0];
    for &candidate in &scores[1..] {
        if candidate.1 > winner.1 {
            winner = candidate;
        }
    }
    winner.0
}

/// Detect the language of a single line. Empty or whitespace-only input
/// defaults to English.
pub fn detect_line(line: &str) -> Language {
    if line.trim().is_empty() {
        return Language::English;
    }
    best_language(language_scores(count_scripts(line)))
}

/// Detect the language of a single block.
pub fn detect_block(block: &SubtitleBlock) -> Language {
    let text = block.text();
    if text.trim().is_empty() {
        return Language::English;
    }
    best_language(language_scores(count_scripts(&text)))
}

/// Detect the primary language of a whole document.
pub fn detect_document(document: &SrtDocument) -> Language {
    if document.blocks.is_empty() {
        return Language::English;
    }

    let combined = document
        .blocks
        .iter()
        .map(|block| block.text())
        .collect::<Vec<_>>()
        .join(" ");

    if combined.trim().is_empty() {
        return Language::English;
    }
    best_language(language_scores(count_scripts(&combined)))
}

/// New document with every block tagged with its own detected language.
pub fn tag_block_languages(document: &SrtDocument) -> SrtDocument {
    let tagged = document
        .blocks
        .iter()
        .map(|block| {
            let mut block = block.clone();
            block.language = Some(detect_block(&block));
            block
        })
        .collect();

    document.with_blocks(tagged)
}

/// A document is mixed when scanning its blocks yields more than one
/// distinct winning language.
pub fn is_mixed_language(document: &SrtDocument) -> bool {
    if document.blocks.len() < 2 {
        return false;
    }

    let mut seen: Option<Language> = None;
    for block in &document.blocks {
        let lang = detect_block(block);
        match seen {
            None => seen = Some(lang),
            Some(first) if first != lang => return true,
            Some(_) => {}
        }
    }
    false
}

/// Detailed language analysis for verbose reporting.
#[derive(Debug, Clone)]
pub struct LanguageStatistics {
    /// Document-level winner
    pub detected_language: Language,
    /// Confidence score per candidate, in declaration order
    pub scores: Vec<(Language, f64)>,
    /// Number of blocks analyzed
    pub block_count: usize,
    /// Block-level language distribution
    pub distribution: Vec<(Language, usize)>,
    /// Whether more than one block-level language was seen
    pub mixed: bool,
}

/// Compute document-level statistics: score table, per-block language
/// distribution and the mixed flag.
pub fn language_statistics(document: &SrtDocument) -> LanguageStatistics {
    let combined = document
        .blocks
        .iter()
        .map(|block| block.text())
        .collect::<Vec<_>>()
        .join(" ");
    let scores = language_scores(count_scripts(&combined));

    let mut distribution: Vec<(Language, usize)> =
        Language::ALL.iter().map(|&l| (l, 0)).collect();
    for block in &document.blocks {
        let lang = detect_block(block);
        if let Some(entry) = distribution.iter_mut().find(|(l, _)| *l == lang) {
            entry.1 += 1;
        }
    }
    distribution.retain(|&(_, count)| count > 0);

    LanguageStatistics {
        detected_language: detect_document(document),
        scores: scores.to_vec(),
        block_count: document.blocks.len(),
        mixed: distribution.len() > 1,
        distribution,
    }
}
