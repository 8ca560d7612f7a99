/*!
 * Japanese line engine.
 *
 * Follows the CJK shape of the Chinese engine: no-separator merges and
 * particle-anchored breaks, with the tighter 13-character cap Japanese
 * subtitles carry. Break points prefer bound particles (助詞), then
 * punctuation including the ideographic comma.
 */

use crate::app_config::{Language, ProcessingConfig};
use crate::subtitle::SubtitleBlock;

use super::{normalize_dialogue_lines, raw_index_for_visible, slice_to_string, visible_length};

const PUNCTUATION: &[char] = &[
    '。', '！', '？', '、', '：', '；', '“', '”', '（', '）', '【', '】', '《', '》',
    '〈', '〉', '「', '」',
];
const SENTENCE_ENDINGS: &[char] = &['。', '！', '？'];

// Single-character bound particles that make good break points.
const PARTICLES: &[char] = &[
    'は', 'が', 'を', 'に', 'で', 'と', 'の', 'へ', 'や', 'て', 'も', 'ね', 'よ',
];

// Two-character particles, matched before the single-character set.
const PARTICLE_PAIRS: &[&str] = &["から", "まで", "より", "だけ", "ほど"];

// Trailing forms that mark an unfinished clause.
const CONTINUATION_ENDINGS: &[&str] = &["て", "で", "が", "し", "けど", "から", "ので"];

const MIN_TAIL: usize = 5;
const MIN_OVERFLOW: usize = 3;
const MIN_COMPLETE: usize = 8;

pub struct JapaneseEngine {
    config: ProcessingConfig,
    limit: usize,
}

impl JapaneseEngine {
    pub fn new(config: ProcessingConfig) -> Self {
        let limit = config.character_limit(Language::Japanese);
        Self { config, limit }
    }

    pub fn process_block(&self, block: &SubtitleBlock) -> SubtitleBlock {
        if block.lines.is_empty() {
            return block.clone();
        }

        let mut lines = normalize_dialogue_lines(&block.lines);

        if lines.len() > 1 {
            lines = self.smart_merge(lines);
        }

        let mut broken = Vec::new();
        for line in &lines {
            broken.extend(self.break_line(line));
        }
        lines = broken;

        if !self.config.no_punct_fix {
            self.repair_terminal_punctuation(&mut lines);
        }

        block.with_lines(lines)
    }

    fn smart_merge(&self, lines: Vec<String>) -> Vec<String> {
        let mut merged = Vec::new();
        let mut current = String::new();

        for line in lines {
            if self.should_merge(&current, &line) {
                // Japanese joins without a separator.
                current.push_str(&line);
            } else {
                if !current.is_empty() {
                    merged.push(std::mem::take(&mut current));
                }
                current = line;
            }
        }

        if !current.is_empty() {
            merged.push(current);
        }
        merged
    }

    fn should_merge(&self, current: &str, next: &str) -> bool {
        if current.is_empty() {
            return false;
        }

        if current
            .chars()
            .next_back()
            .is_some_and(|c| SENTENCE_ENDINGS.contains(&c))
        {
            return false;
        }

        if current.starts_with("- ") != next.starts_with("- ") {
            return false;
        }

        let merged_length = visible_length(Language::Japanese, current)
            + visible_length(Language::Japanese, next);
        merged_length <= self.limit
    }

    fn break_line(&self, line: &str) -> Vec<String> {
        let length = visible_length(Language::Japanese, line);
        if length <= self.limit {
            return vec![line.to_string()];
        }

        if length - self.limit < MIN_OVERFLOW {
            return vec![line.to_string()];
        }

        let chars: Vec<char> = line.chars().collect();
        let raw_limit = raw_index_for_visible(&chars, self.limit);

        let break_pos = self
            .find_break_position(&chars, raw_limit)
            .unwrap_or(raw_limit);

        let first = slice_to_string(&chars[..break_pos]).trim_end().to_string();
        let second = slice_to_string(&chars[break_pos..])
            .trim_start()
            .to_string();

        if visible_length(Language::Japanese, &second) < MIN_TAIL {
            return vec![line.to_string()];
        }

        let mut result = vec![first];
        if second.chars().count() < chars.len() {
            result.extend(self.break_line(&second));
        } else {
            result.push(second);
        }
        result
    }

    // Preference order: two-character particle, single particle,
    // punctuation, space. Breaks fall *after* the particle so the bound
    // form stays attached to its head.
    fn find_break_position(&self, chars: &[char], raw_limit: usize) -> Option<usize> {
        let search_start = raw_limit.saturating_sub(8);
        let search_end = chars.len().min(raw_limit + 3);

        for i in (search_start..search_end.saturating_sub(1)).rev() {
            if i + 2 <= chars.len() {
                let pair: String = chars[i..i + 2].iter().collect();
                if PARTICLE_PAIRS.contains(&pair.as_str()) && i + 2 <= raw_limit {
                    return Some(i + 2);
                }
            }
        }

        for i in (search_start..search_end).rev() {
            if PARTICLES.contains(&chars[i]) && i + 1 <= raw_limit {
                return Some(i + 1);
            }
        }

        for i in (search_start..search_end).rev() {
            if PUNCTUATION.contains(&chars[i]) && i + 1 <= raw_limit {
                return Some(i + 1);
            }
        }

        for i in (search_start..search_end).rev() {
            if chars[i] == ' ' && i <= raw_limit {
                return Some(i);
            }
        }

        None
    }

    fn repair_terminal_punctuation(&self, lines: &mut [String]) {
        let Some(last) = lines.last_mut() else {
            return;
        };
        let trimmed = last.trim();
        if trimmed.is_empty() {
            return;
        }

        let ends_with_punct = trimmed
            .chars()
            .next_back()
            .is_some_and(|c| PUNCTUATION.contains(&c));

        if !ends_with_punct
            && !trimmed.ends_with("...")
            && !trimmed.ends_with('…')
            && !trimmed.starts_with('♪')
            && !Self::is_continuation(trimmed)
        {
            *last = format!("{trimmed}。");
        }
    }

    fn is_continuation(line: &str) -> bool {
        if line.chars().next_back().is_some_and(|c| c == '、') {
            return true;
        }

        if CONTINUATION_ENDINGS
            .iter()
            .any(|ending| line.ends_with(ending))
        {
            return true;
        }

        visible_length(Language::Japanese, line) < MIN_COMPLETE
    }
}
