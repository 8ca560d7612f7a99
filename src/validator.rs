/*!
 * Compliance validation.
 *
 * Checks a document against the per-language character limits and
 * reading-speed caps and reports every violation as a structured value.
 * Validation never mutates the document; comparisons are strict, so a
 * block sitting exactly at a limit is compliant.
 */

use std::collections::BTreeSet;
use std::fmt;

use crate::app_config::{Language, ProcessingConfig};
use crate::engine::visible_length;
use crate::language_detector;
use crate::subtitle::SrtDocument;

/// A single compliance violation, addressable back to its block.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A line exceeds the character limit for its detected language.
    CharacterLimit {
        block_index: usize,
        /// 1-based line number within the block
        line_number: usize,
        count: usize,
        limit: usize,
        language: Language,
    },
    /// A block's reading speed exceeds the cap for its language.
    ReadingSpeed {
        block_index: usize,
        speed: f64,
        limit: f64,
    },
}

impl Violation {
    pub fn block_index(&self) -> usize {
        match self {
            Self::CharacterLimit { block_index, .. } => *block_index,
            Self::ReadingSpeed { block_index, .. } => *block_index,
        }
    }

    pub fn is_character_limit(&self) -> bool {
        matches!(self, Self::CharacterLimit { .. })
    }

    pub fn is_reading_speed(&self) -> bool {
        matches!(self, Self::ReadingSpeed { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharacterLimit {
                block_index,
                line_number,
                count,
                limit,
                language,
            } => write!(
                f,
                "Block {block_index}: Line {line_number} exceeds character limit \
                 ({count} > {limit} {language})"
            ),
            Self::ReadingSpeed {
                block_index,
                speed,
                limit,
            } => write!(
                f,
                "Block {block_index}: Reading speed too fast \
                 ({speed:.1} > {limit} chars/sec)"
            ),
        }
    }
}

/// Aggregated outcome of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub total_blocks: usize,
    pub detected_language: Option<Language>,
}

impl ValidationReport {
    pub fn warning_count(&self) -> usize {
        self.violations.len()
    }

    pub fn character_violation_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.is_character_limit())
            .count()
    }

    pub fn speed_violation_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.is_reading_speed())
            .count()
    }

    /// Distinct indices of blocks carrying at least one violation.
    pub fn violating_block_indices(&self) -> BTreeSet<usize> {
        self.violations.iter().map(|v| v.block_index()).collect()
    }

    pub fn compliant_blocks(&self) -> usize {
        self.total_blocks
            .saturating_sub(self.violating_block_indices().len())
    }

    /// Percentage of blocks without violations; 0.0 for an empty document.
    pub fn compliance_rate(&self) -> f64 {
        if self.total_blocks == 0 {
            return 0.0;
        }
        self.compliant_blocks() as f64 / self.total_blocks as f64 * 100.0
    }

    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations_for_block(&self, block_index: usize) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.block_index() == block_index)
            .collect()
    }
}

/// Validates documents against the configured limits.
pub struct Validator {
    config: ProcessingConfig,
}

impl Validator {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Validate every block. Character limits are checked per line with
    /// per-line language detection so bilingual blocks are judged under
    /// the right limit; reading speed is checked per block.
    pub fn validate(&self, document: &SrtDocument) -> ValidationReport {
        let mut violations = Vec::new();

        for block in &document.blocks {
            let block_language = block
                .language
                .or(document.detected_language)
                .unwrap_or(Language::English);

            for (line_idx, line) in block.lines.iter().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }

                let line_language = language_detector::detect_line(line);
                let limit = self.config.character_limit(line_language);
                let count = visible_length(line_language, line);

                if count > limit {
                    violations.push(Violation::CharacterLimit {
                        block_index: block.index,
                        line_number: line_idx + 1,
                        count,
                        limit,
                        language: line_language,
                    });
                }
            }

            if !self.config.no_speed_check {
                let speed = block.reading_speed();
                let limit = self.config.reading_speed_limit(block_language);
                if speed > limit {
                    violations.push(Violation::ReadingSpeed {
                        block_index: block.index,
                        speed,
                        limit,
                    });
                }
            }
        }

        ValidationReport {
            violations,
            total_blocks: document.total_blocks(),
            detected_language: document.detected_language,
        }
    }
}
