/*!
 * Chinese line engine.
 *
 * Merges without separators, breaks after helper words (助词) or
 * punctuation near the limit, and repairs missing terminal punctuation
 * on complete sentences.
 */

use crate::app_config::{Language, ProcessingConfig};
use crate::subtitle::SubtitleBlock;

use super::{normalize_dialogue_lines, raw_index_for_visible, slice_to_string, visible_length};

const PUNCTUATION: &[char] = &[
    '。', '！', '？', '，', '：', '；', '“', '”', '（', '）', '【', '】', '《', '》',
];
const SENTENCE_ENDINGS: &[char] = &['。', '！', '？'];

// Helper words that make good break points when they sit near the limit.
const HELPER_WORDS: &[char] = &[
    '的', '地', '得', '了', '吧', '呢', '啊', '哦', '嗯', '呀', '哇', '吗', '嘛',
];

// Trailing words that mark an unfinished clause.
const CONTINUATION_WORDS: &[&str] = &[
    "和", "或", "但", "而", "因为", "所以", "如果", "那么",
];

// A broken-off tail shorter than this reads worse than a long line.
const MIN_TAIL: usize = 5;
// Overflows smaller than this are not worth a break.
const MIN_OVERFLOW: usize = 3;

pub struct ChineseEngine {
    config: ProcessingConfig,
    limit: usize,
}

impl ChineseEngine {
    pub fn new(config: ProcessingConfig) -> Self {
        let limit = config.character_limit(Language::Chinese);
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
                // Chinese joins without a separator.
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

        // A dialogue line never absorbs narration, and vice versa.
        if current.starts_with("- ") != next.starts_with("- ") {
            return false;
        }

        let merged_length = visible_length(Language::Chinese, current)
            + visible_length(Language::Chinese, next);
        merged_length <= self.limit
    }

    /// Break one over-long line, recursing on the tail. Terminates
    /// because the tail is always strictly shorter.
    fn break_line(&self, line: &str) -> Vec<String> {
        let length = visible_length(Language::Chinese, line);
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

        if visible_length(Language::Chinese, &second) < MIN_TAIL {
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

    // Preference order: helper word, punctuation, space. Search runs
    // backwards from just past the limit.
    fn find_break_position(&self, chars: &[char], raw_limit: usize) -> Option<usize> {
        let search_start = raw_limit.saturating_sub(10);
        let search_end = chars.len().min(raw_limit + 3);

        for i in (search_start..search_end).rev() {
            if HELPER_WORDS.contains(&chars[i]) && i + 1 <= raw_limit {
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
            && !trimmed.starts_with('♪')
            && !trimmed.ends_with('，')
            && !Self::is_continuation(trimmed)
        {
            *last = format!("{trimmed}。");
        }
    }

    fn is_continuation(line: &str) -> bool {
        if line
            .chars()
            .next_back()
            .is_some_and(|c| c == '，' || c == '、')
        {
            return true;
        }

        if line
            .split_whitespace()
            .next_back()
            .is_some_and(|word| CONTINUATION_WORDS.contains(&word))
        {
            return true;
        }

        // Short fragments are almost always mid-sentence.
        visible_length(Language::Chinese, line) < 8
    }
}
