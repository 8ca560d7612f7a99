use std::fmt;
use std::path::PathBuf;

use crate::app_config::Language;
use crate::sdh;
use crate::time_code::TimeCode;

// @module: Subtitle block and document model

/// One timed subtitle unit: index, time span, ordered text lines.
///
/// Blocks are value types: every processing stage returns a new block
/// rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleBlock {
    /// 1-based sequence number
    pub index: usize,

    /// Display time span
    pub time_code: TimeCode,

    /// Ordered text lines
    pub lines: Vec<String>,

    /// Per-block detected language, when known
    pub language: Option<Language>,

    /// Whether the block carries SDH markers
    pub is_sdh: bool,
}

impl SubtitleBlock {
    /// Creates a new block without language or SDH tagging.
    pub fn new(index: usize, time_code: TimeCode, lines: Vec<String>) -> Self {
        SubtitleBlock {
            index,
            time_code,
            lines,
            language: None,
            is_sdh: false,
        }
    }

    /// All lines joined with a newline.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Total character count across all lines, in Unicode code points.
    pub fn character_count(&self) -> usize {
        self.lines.iter().map(|line| line.chars().count()).sum()
    }

    /// Whether any line starts with a dialogue dash.
    pub fn is_dialogue(&self) -> bool {
        self.lines.iter().any(|line| line.trim_start().starts_with('-'))
    }

    /// Whether any line carries an SDH marker (glyph or bracketed cue).
    pub fn has_sdh_marker(&self) -> bool {
        self.lines.iter().any(|line| sdh::has_sdh_marker(line))
    }

    /// Whether the block contains only SDH content and no dialogue.
    pub fn is_sdh_only(&self) -> bool {
        sdh::is_sdh_only_block(&self.lines)
    }

    /// New block with SDH markers stripped from each line; lines reduced
    /// to nothing are dropped.
    pub fn clean_sdh_markers(&self) -> SubtitleBlock {
        let cleaned_lines: Vec<String> = self
            .lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| sdh::clean_line(line))
            .filter(|line| !line.trim().is_empty())
            .collect();

        SubtitleBlock {
            index: self.index,
            time_code: self.time_code,
            lines: cleaned_lines,
            language: self.language,
            is_sdh: self.is_sdh,
        }
    }

    /// New block with the lines replaced, everything else kept.
    pub fn with_lines(&self, lines: Vec<String>) -> SubtitleBlock {
        SubtitleBlock {
            index: self.index,
            time_code: self.time_code,
            lines,
            language: self.language,
            is_sdh: self.is_sdh,
        }
    }

    /// Reading speed in characters per second; 0.0 for a non-positive
    /// duration (never divides by zero).
    pub fn reading_speed(&self) -> f64 {
        let duration = self.time_code.duration_seconds();
        if duration <= 0.0 {
            return 0.0;
        }
        self.character_count() as f64 / duration
    }
}

impl fmt::Display for SubtitleBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{}", self.time_code)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// Complete SRT document: ordered blocks plus source metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SrtDocument {
    /// Subtitle blocks in document order
    pub blocks: Vec<SubtitleBlock>,

    /// Source file, when parsed from disk
    pub source_file: Option<PathBuf>,

    /// Document-level detected language, set during orchestration
    pub detected_language: Option<Language>,

    /// Encoding label reported by the decoder
    pub encoding: String,
}

impl SrtDocument {
    /// Creates a document from parsed blocks.
    pub fn new(blocks: Vec<SubtitleBlock>) -> Self {
        SrtDocument {
            blocks,
            source_file: None,
            detected_language: None,
            encoding: "utf-8".to_string(),
        }
    }

    /// Number of blocks.
    pub fn total_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// New document with SDH-only blocks dropped, the remaining blocks
    /// cleaned of SDH markers, and indices renumbered from 1.
    pub fn remove_sdh_blocks_and_clean(&self) -> SrtDocument {
        let cleaned: Vec<SubtitleBlock> = self
            .blocks
            .iter()
            .filter(|block| !block.is_sdh_only())
            .map(|block| block.clean_sdh_markers())
            .filter(|block| block.lines.iter().any(|line| !line.trim().is_empty()))
            .collect();

        SrtDocument {
            blocks: Self::renumber(cleaned),
            source_file: self.source_file.clone(),
            detected_language: self.detected_language,
            encoding: self.encoding.clone(),
        }
    }

    /// New document with replaced blocks, metadata kept.
    pub fn with_blocks(&self, blocks: Vec<SubtitleBlock>) -> SrtDocument {
        SrtDocument {
            blocks,
            source_file: self.source_file.clone(),
            detected_language: self.detected_language,
            encoding: self.encoding.clone(),
        }
    }

    // Reassign indices to a contiguous 1-based sequence.
    fn renumber(mut blocks: Vec<SubtitleBlock>) -> Vec<SubtitleBlock> {
        for (i, block) in blocks.iter_mut().enumerate() {
            block.index = i + 1;
        }
        blocks
    }

    /// Serialize back to the SRT wire format, including the blank
    /// separator after the final block.
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str(&block.to_string());
        }
        out
    }
}

impl fmt::Display for SrtDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "SRT Document")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(
            f,
            "Language: {}",
            self.detected_language
                .map(|l| l.code())
                .unwrap_or("unknown")
        )?;
        writeln!(f, "Blocks: {}", self.blocks.len())?;
        Ok(())
    }
}
