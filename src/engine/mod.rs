/*!
 * Per-language line engines.
 *
 * Each engine reformats one subtitle block through the same four ordered
 * stages: dialogue normalization, smart merge, intelligent re-break, and
 * (for CJK languages) terminal punctuation repair. The stages share a
 * per-language visible-length counter so the engines and the validator
 * always agree on what "too long" means.
 */

pub mod chinese;
pub mod english;
pub mod japanese;
pub mod korean;

use crate::app_config::{Language, ProcessingConfig};
use crate::subtitle::SubtitleBlock;

use chinese::ChineseEngine;
use english::EnglishEngine;
use japanese::JapaneseEngine;
use korean::KoreanEngine;

/// Visible line length in code points under a language's counting rule.
///
/// Chinese and Japanese ignore ASCII spaces (they carry no reading cost);
/// English and Korean count them, since inter-word spacing is part of the
/// displayed line width.
pub fn visible_length(language: Language, text: &str) -> usize {
    match language {
        Language::Chinese | Language::Japanese => {
            text.chars().filter(|&c| c != ' ').count()
        }
        Language::English | Language::Korean => text.chars().count(),
    }
}

/// Reformat one block with the engine for the given language.
///
/// The config is re-targeted to the language for the duration of the call;
/// the caller's value is untouched. This is the seam the bilingual path
/// uses to run different lines of one block through different engines.
pub fn apply_line_engine(
    language: Language,
    config: &ProcessingConfig,
    block: &SubtitleBlock,
) -> SubtitleBlock {
    let config = config.with_language(language);
    match language {
        Language::Chinese => ChineseEngine::new(config).process_block(block),
        Language::English => EnglishEngine::new(config).process_block(block),
        Language::Korean => KoreanEngine::new(config).process_block(block),
        Language::Japanese => JapaneseEngine::new(config).process_block(block),
    }
}

/// Normalize dialogue markers: a leading dash becomes exactly `"- "`,
/// blank lines are dropped, surrounding whitespace is trimmed.
pub(crate) fn normalize_dialogue_lines(lines: &[String]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(lines.len());

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('-') {
            normalized.push(format!("- {}", rest.trim_start()));
        } else {
            normalized.push(trimmed.to_string());
        }
    }

    normalized
}

/// Raw char index at which `limit` visible (non-space) characters have
/// been consumed. Identity for languages that count spaces.
pub(crate) fn raw_index_for_visible(chars: &[char], limit: usize) -> usize {
    let mut seen = 0;
    for (i, &c) in chars.iter().enumerate() {
        if c != ' ' {
            seen += 1;
            if seen == limit {
                return i + 1;
            }
        }
    }
    chars.len()
}

pub(crate) fn slice_to_string(chars: &[char]) -> String {
    chars.iter().collect()
}
