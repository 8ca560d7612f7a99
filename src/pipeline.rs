/*!
 * Document pipeline.
 *
 * Runs a parsed document through the full reformatting flow: language
 * detection and tagging, SDH cleanup, and per-block engine dispatch with
 * a bilingual path that re-targets each same-language run of lines to
 * its own engine. The check-only path shares the front half and hands
 * the prepared document straight to the validator.
 */

use log::{debug, info};

use crate::app_config::{Language, LanguageChoice, ProcessingConfig};
use crate::engine::apply_line_engine;
use crate::errors::ParseError;
use crate::language_detector;
use crate::parser::SrtParser;
use crate::subtitle::{SrtDocument, SubtitleBlock};
use crate::validator::{ValidationReport, Validator};

pub struct Pipeline {
    config: ProcessingConfig,
}

impl Pipeline {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Parse and reformat SRT content.
    pub fn process(&self, content: &str) -> Result<SrtDocument, ParseError> {
        let document = SrtParser::parse(content)?;
        Ok(self.process_document(document))
    }

    /// Parse and validate SRT content without reformatting it.
    pub fn check(&self, content: &str) -> Result<ValidationReport, ParseError> {
        let document = SrtParser::parse(content)?;
        let (_, report) = self.check_document(document);
        Ok(report)
    }

    /// Validate an already-parsed document. Returns the prepared
    /// document alongside the report so callers can render violating
    /// blocks with their detected languages attached.
    pub fn check_document(&self, document: SrtDocument) -> (SrtDocument, ValidationReport) {
        let prepared = self.prepare(document);
        let report = Validator::new(self.config.clone()).validate(&prepared);
        (prepared, report)
    }

    /// Reformat an already-parsed document.
    pub fn process_document(&self, document: SrtDocument) -> SrtDocument {
        let prepared = self.prepare(document);
        let language = prepared.detected_language.unwrap_or(Language::English);

        let processed = prepared
            .blocks
            .iter()
            .map(|block| {
                if Self::is_bilingual_block(block) {
                    debug!("block {} is bilingual, processing per line run", block.index);
                    self.process_bilingual_block(block)
                } else {
                    let block_language = block.language.unwrap_or(language);
                    apply_line_engine(block_language, &self.config, block)
                }
            })
            .collect();

        prepared.with_blocks(processed)
    }

    /// Shared front half: resolve the document language, tag every
    /// block, and strip SDH content when configured to.
    fn prepare(&self, document: SrtDocument) -> SrtDocument {
        let language = match self.config.language {
            LanguageChoice::Fixed(language) => language,
            LanguageChoice::Auto => {
                let detected = language_detector::detect_document(&document);
                info!("detected document language: {}", detected.display_name());
                detected
            }
        };

        let mut document = language_detector::tag_block_languages(&document);
        document.detected_language = Some(language);

        if self.config.remove_sdh {
            document = document.remove_sdh_blocks_and_clean();
        }

        document
    }

    /// More than one distinct language across the block's lines.
    fn is_bilingual_block(block: &SubtitleBlock) -> bool {
        if block.lines.len() < 2 {
            return false;
        }

        let mut first: Option<Language> = None;
        for line in &block.lines {
            if line.trim().is_empty() {
                continue;
            }
            let line_language = language_detector::detect_line(line);
            match first {
                None => first = Some(line_language),
                Some(seen) if seen != line_language => return true,
                Some(_) => {}
            }
        }
        false
    }

    /// Partition the lines into maximal same-language runs and run each
    /// through its engine. Runs never merge across each other, so a
    /// Chinese line and its English counterpart stay separate.
    fn process_bilingual_block(&self, block: &SubtitleBlock) -> SubtitleBlock {
        let mut processed_lines = Vec::with_capacity(block.lines.len());
        let lines = &block.lines;
        let mut i = 0;

        while i < lines.len() {
            if lines[i].trim().is_empty() {
                i += 1;
                continue;
            }

            let run_language = language_detector::detect_line(&lines[i]);
            let mut run = vec![lines[i].clone()];

            let mut j = i + 1;
            while j < lines.len() {
                if lines[j].trim().is_empty() {
                    j += 1;
                    continue;
                }
                if language_detector::detect_line(&lines[j]) == run_language {
                    run.push(lines[j].clone());
                    j += 1;
                } else {
                    break;
                }
            }

            let run_block = block.with_lines(run);
            let processed = apply_line_engine(run_language, &self.config, &run_block);
            processed_lines.extend(processed.lines);

            i = j;
        }

        block.with_lines(processed_lines)
    }
}
