/*!
 * Korean line engine.
 *
 * Space-joined merges, breaks at word boundaries first and after bound
 * particles (조사/어미) second, and appends a terminal period to
 * complete sentences.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::app_config::{Language, ProcessingConfig};
use crate::subtitle::SubtitleBlock;

use super::{normalize_dialogue_lines, slice_to_string, visible_length};

const PUNCTUATION: &[char] = &[
    '。', '！', '？', '，', '：', '；', '“', '”', '（', '）', '【', '】', '《', '》',
];
const SENTENCE_ENDINGS: &[char] = &['。', '！', '？'];

// Particles and endings that make acceptable break points. One- and
// two-syllable forms are matched separately during the scan.
static HELPER_PARTICLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "은", "는", "이", "가", "을", "를", "에", "에서", "로", "으로", "와", "과",
        "의", "도", "만", "까지", "부터", "보다", "처럼", "다", "요", "죠", "네",
        "지", "니", "까", "야", "아", "어", "고", "서", "면", "려고", "하고",
        "때문에", "가지고",
    ])
});

// Trailing connective endings that mark an unfinished sentence.
static CONTINUATION_ENDINGS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "고", "서", "면", "며", "는데", "지만", "하고", "가지고", "때문에", "하면서",
        "다가", "으면서", "으니까", "니까", "하여", "해서", "에서", "으로", "로",
        "와", "과",
    ]
});

const MIN_TAIL: usize = 4;
const MIN_OVERFLOW: usize = 3;
// Lines shorter than this read as mid-sentence fragments.
const MIN_COMPLETE: usize = 6;

pub struct KoreanEngine {
    config: ProcessingConfig,
    limit: usize,
}

impl KoreanEngine {
    pub fn new(config: ProcessingConfig) -> Self {
        let limit = config.character_limit(Language::Korean);
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
                // Korean joins with a space.
                current.push(' ');
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

        let merged_length = visible_length(Language::Korean, current)
            + 1
            + visible_length(Language::Korean, next);
        merged_length <= self.limit
    }

    fn break_line(&self, line: &str) -> Vec<String> {
        let length = visible_length(Language::Korean, line);
        if length <= self.limit {
            return vec![line.to_string()];
        }

        if length - self.limit < MIN_OVERFLOW {
            return vec![line.to_string()];
        }

        let chars: Vec<char> = line.chars().collect();
        let break_pos = self.find_break_position(&chars).unwrap_or(self.limit);

        let first = slice_to_string(&chars[..break_pos]).trim_end().to_string();
        let second = slice_to_string(&chars[break_pos..])
            .trim_start()
            .to_string();

        if visible_length(Language::Korean, &second) < MIN_TAIL {
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

    // Preference order: space, two-syllable particle, single-syllable
    // particle, punctuation. Word boundaries matter in Korean, so spaces
    // outrank everything else.
    fn find_break_position(&self, chars: &[char]) -> Option<usize> {
        let search_start = self.limit.saturating_sub(8);
        let search_end = chars.len().min(self.limit + 3);

        for i in (search_start..search_end).rev() {
            if chars[i] == ' ' && i <= self.limit {
                return Some(i);
            }
        }

        for i in (search_start..search_end.saturating_sub(1)).rev() {
            if i + 2 <= chars.len() {
                let pair: String = chars[i..i + 2].iter().collect();
                if HELPER_PARTICLES.contains(pair.as_str()) && i + 2 <= self.limit {
                    return Some(i + 2);
                }
            }
        }

        for i in (search_start..search_end).rev() {
            let single = chars[i].to_string();
            if HELPER_PARTICLES.contains(single.as_str()) && i + 1 <= self.limit {
                return Some(i + 1);
            }
        }

        for i in (search_start..search_end).rev() {
            if PUNCTUATION.contains(&chars[i]) && i + 1 <= self.limit {
                return Some(i + 1);
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
            .is_some_and(|c| PUNCTUATION.contains(&c) || c == '.');

        if !ends_with_punct
            && !trimmed.ends_with("...")
            && !trimmed.starts_with('♪')
            && !Self::is_continuation(trimmed)
        {
            *last = format!("{trimmed}.");
        }
    }

    fn is_continuation(line: &str) -> bool {
        if CONTINUATION_ENDINGS
            .iter()
            .any(|ending| line.ends_with(ending))
        {
            return true;
        }
        visible_length(Language::Korean, line) < MIN_COMPLETE
    }
}
