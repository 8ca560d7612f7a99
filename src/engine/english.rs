/*!
 * English line engine.
 *
 * Word-based: merges aggressively to undo over-broken uploads, breaks at
 * punctuation or before conjunctions/prepositions, and finishes with a
 * short-line fold so a stray three-word tail never stands alone.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::app_config::{Language, ProcessingConfig};
use crate::subtitle::SubtitleBlock;

use super::{normalize_dialogue_lines, slice_to_string, visible_length};

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "and",
        "but",
        "or",
        "nor",
        "for",
        "so",
        "yet",
        "because",
        "since",
        "although",
        "though",
        "while",
        "whereas",
        "however",
        "therefore",
        "moreover",
        "furthermore",
        "nevertheless",
        "nonetheless",
    ])
});

static PREPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "in", "on", "at", "by", "for", "with", "from", "to", "of", "about", "under",
        "over", "through", "between", "among", "during", "before", "after", "above",
        "below", "across", "around", "behind", "beside",
    ])
});

// Words a line should never end on; the next line belongs with them.
static TRAILING_CONNECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "a", "an", "the", "of", "in", "on", "at", "to", "for", "with", "by", "and",
        "or", "but",
    ])
});

const SENTENCE_ENDINGS: &[char] = &['.', '!', '?'];
const BREAK_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];
const WORD_TRIM: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}', '—', '–', '-',
];

// Aggressive-merge thresholds (characters).
const SHORT_LINE: usize = 25;
const SHORT_TAIL: usize = 20;
// Re-break refusal thresholds: remaining words and second-line shape.
const MIN_REMAINING_WORDS: usize = 4;
const MIN_SECOND_CHARS: usize = 20;
const MIN_SECOND_WORDS: usize = 3;

pub struct EnglishEngine {
    limit: usize,
}

impl EnglishEngine {
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            limit: config.character_limit(Language::English),
        }
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
        lines = self.fold_short_lines(broken);

        block.with_lines(lines)
    }

    fn smart_merge(&self, lines: Vec<String>) -> Vec<String> {
        let mut merged = Vec::new();
        let mut current = String::new();

        for line in lines {
            if self.should_merge(&current, &line) {
                let current_is_dialogue = current.starts_with("- ");
                let next_is_dialogue = line.starts_with("- ");

                if current_is_dialogue && next_is_dialogue {
                    // Two speakers stay on separate lines.
                    merged.push(std::mem::take(&mut current));
                    current = line;
                } else if !current_is_dialogue && next_is_dialogue {
                    merged.push(std::mem::take(&mut current));
                    current = line;
                } else {
                    current.push(' ');
                    current.push_str(&line);
                }
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

        if current.starts_with("- ") && next.starts_with("- ") {
            return false;
        }

        let fits = |a: &str, b: &str| {
            visible_length(Language::English, a) + 1 + visible_length(Language::English, b)
                <= self.limit
        };

        let current_length = visible_length(Language::English, current);
        let next_length = visible_length(Language::English, next);

        // Over-broken uploads are the common case, so merge eagerly:
        // a very short line on either side always wants company.
        if current_length < SHORT_LINE || next_length < SHORT_LINE {
            return fits(current, next);
        }

        if current
            .split_whitespace()
            .next_back()
            .is_some_and(|word| TRAILING_CONNECTIVES.contains(word.to_lowercase().as_str()))
        {
            return fits(current, next);
        }

        fits(current, next)
    }

    fn break_line(&self, line: &str) -> Vec<String> {
        let length = visible_length(Language::English, line);
        if length <= self.limit {
            return vec![line.to_string()];
        }

        if !self.should_break(line) {
            return vec![line.to_string()];
        }

        let chars: Vec<char> = line.chars().collect();
        let break_pos = self
            .find_break_position(&chars)
            .or_else(|| self.find_word_boundary(&chars))
            .unwrap_or(self.limit);

        let first = slice_to_string(&chars[..break_pos]).trim_end().to_string();
        let second = slice_to_string(&chars[break_pos..])
            .trim_start()
            .to_string();

        let mut result = vec![first];
        if second.chars().count() < chars.len() {
            result.extend(self.break_line(&second));
        } else {
            result.push(second);
        }
        result
    }

    // Refuse the break unless it leaves a real second line: at least four
    // words past the limit, and a tail of three-plus words over 20 chars.
    // Keeps fragments like "Do that, then." off their own line.
    fn should_break(&self, line: &str) -> bool {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() <= self.limit {
            return false;
        }

        let remaining = slice_to_string(&chars[self.limit..]);
        let remaining = remaining.trim();
        if remaining.is_empty() {
            return false;
        }
        if remaining.split_whitespace().count() < MIN_REMAINING_WORDS {
            return false;
        }

        let Some(break_pos) = self.find_break_position(&chars) else {
            return false;
        };
        if break_pos == 0 {
            return false;
        }

        let second = slice_to_string(&chars[break_pos..]);
        let second = second.trim();
        if second.chars().count() < MIN_SECOND_CHARS {
            return false;
        }
        if second.split_whitespace().count() < MIN_SECOND_WORDS {
            return false;
        }

        true
    }

    // Preference order: punctuation just before the limit, then a
    // conjunction, then a preposition (both broken *before* the word).
    fn find_break_position(&self, chars: &[char]) -> Option<usize> {
        let search_start = self.limit.saturating_sub(20);
        let search_end = chars.len().min(self.limit);

        for i in (search_start..search_end).rev() {
            if BREAK_PUNCTUATION.contains(&chars[i]) {
                return Some(i + 1);
            }
        }

        if let Some(pos) = self.find_word_start(chars, search_start, search_end, &CONJUNCTIONS)
        {
            return Some(pos);
        }
        if let Some(pos) = self.find_word_start(chars, search_start, search_end, &PREPOSITIONS)
        {
            return Some(pos);
        }

        None
    }

    // Start offset of the first word from `set` whose start falls inside
    // the search window, scanning the text before the limit.
    fn find_word_start(
        &self,
        chars: &[char],
        search_start: usize,
        search_end: usize,
        set: &HashSet<&'static str>,
    ) -> Option<usize> {
        let prefix = slice_to_string(&chars[..chars.len().min(self.limit)]);

        let mut offset = 0;
        for word in prefix.split(' ') {
            let word_chars = word.chars().count();
            let clean = word
                .trim_matches(|c| WORD_TRIM.contains(&c))
                .to_lowercase();

            if !clean.is_empty()
                && set.contains(clean.as_str())
                && offset >= search_start
                && offset <= search_end
                && offset > 0
            {
                return Some(offset);
            }
            offset += word_chars + 1;
        }

        None
    }

    fn find_word_boundary(&self, chars: &[char]) -> Option<usize> {
        let search_start = self.limit.saturating_sub(15);
        let search_end = chars.len().min(self.limit + 5);

        (search_start..search_end).rev().find(|&i| chars[i] == ' ')
    }

    // Final pass: a short tail (or short lead) folds back into one line
    // when the result still fits. Two dialogue lines never fold.
    fn fold_short_lines(&self, lines: Vec<String>) -> Vec<String> {
        if lines.len() <= 1 {
            return lines;
        }

        let mut result = Vec::with_capacity(lines.len());
        let mut i = 0;

        while i < lines.len() {
            let current = lines[i].trim().to_string();
            if current.is_empty() {
                i += 1;
                continue;
            }

            if i + 1 < lines.len() {
                let next = lines[i + 1].trim().to_string();
                let current_is_dialogue = current.starts_with("- ");
                let next_is_dialogue = next.starts_with("- ");

                let wants_fold = (visible_length(Language::English, &next) < SHORT_TAIL
                    || visible_length(Language::English, &current) < SHORT_LINE)
                    && !(current_is_dialogue && next_is_dialogue)
                    && !(!current_is_dialogue && next_is_dialogue)
                    && !next.is_empty();

                if wants_fold {
                    let merged = format!("{current} {next}");
                    if visible_length(Language::English, &merged) <= self.limit {
                        result.push(merged);
                        i += 2;
                        continue;
                    }
                }
            }

            result.push(current);
            i += 1;
        }

        result
    }
}
