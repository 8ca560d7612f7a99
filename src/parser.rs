/*!
 * SRT document parser.
 *
 * The wire format is blank-line separated blocks, each an index line, a
 * time code line, then one or more text lines. A text line that is itself
 * a bare integer is only treated as the next block's index when the line
 * after it is a valid time code line; that lookahead keeps numeric
 * dialogue ("2") inside the block it belongs to.
 */

use log::warn;
use std::path::Path;

use crate::errors::ParseError;
use crate::subtitle::{SrtDocument, SubtitleBlock};
use crate::time_code::TimeCode;

/// Parser for SRT subtitle content. Stateless; all methods take the
/// content to parse.
pub struct SrtParser;

impl SrtParser {
    /// Parse already-decoded SRT content into a document.
    pub fn parse(content: &str) -> Result<SrtDocument, ParseError> {
        let lines: Vec<&str> = content.lines().collect();
        let mut blocks = Vec::new();
        let mut cursor = 0;
        let mut expected_index = 1;

        while cursor < lines.len() {
            // Skip blank lines between blocks
            while cursor < lines.len() && lines[cursor].trim().is_empty() {
                cursor += 1;
            }
            if cursor >= lines.len() {
                break;
            }

            let (block, next) = Self::parse_block(&lines, cursor)?;

            // Non-sequential indices are a validation issue, not a parse
            // failure; the document keeps what the file said.
            if block.index != expected_index {
                warn!(
                    "Line {}: subtitle index {} out of sequence (expected {})",
                    cursor + 1,
                    block.index,
                    expected_index
                );
            }
            expected_index = block.index + 1;

            blocks.push(block);
            cursor = next;
        }

        Ok(SrtDocument::new(blocks))
    }

    /// Parse content that came from a file, carrying the source path and
    /// encoding label into the document.
    pub fn parse_with_source(
        content: &str,
        source: &Path,
        encoding: &str,
    ) -> Result<SrtDocument, ParseError> {
        let mut document = Self::parse(content)?;
        document.source_file = Some(source.to_path_buf());
        document.encoding = encoding.to_string();
        Ok(document)
    }

    // Parse one block starting at `start` (not blank). Returns the block
    // and the index of the first line after it.
    fn parse_block(
        lines: &[&str],
        start: usize,
    ) -> Result<(SubtitleBlock, usize), ParseError> {
        let mut cursor = start;

        // Index line
        let index_line = lines[cursor].trim();
        let index: usize = match index_line.parse() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(ParseError::InvalidIndex {
                    line: cursor + 1,
                    found: index_line.to_string(),
                })
            }
        };
        cursor += 1;

        if cursor >= lines.len() {
            return Err(ParseError::UnexpectedEof { line: cursor });
        }

        // Time code line
        let time_code = TimeCode::parse_line(lines[cursor], cursor + 1)?;
        cursor += 1;

        // Text lines until a blank line or the start of the next block
        let mut text_lines: Vec<String> = Vec::new();
        while cursor < lines.len() {
            let line = lines[cursor];
            let trimmed = line.trim();

            if trimmed.is_empty() {
                break;
            }

            // Lookahead: a bare integer followed by a time code line is
            // the next block's index, not subtitle text.
            if trimmed.chars().all(|c| c.is_ascii_digit())
                && !trimmed.is_empty()
                && cursor + 1 < lines.len()
                && TimeCode::is_time_line(lines[cursor + 1])
            {
                break;
            }

            text_lines.push(line.trim_end().to_string());
            cursor += 1;
        }

        // Trailing blank text lines are noise
        while text_lines
            .last()
            .is_some_and(|line| line.trim().is_empty())
        {
            text_lines.pop();
        }

        if text_lines.is_empty() {
            return Err(ParseError::EmptyBlock { line: cursor + 1 });
        }

        Ok((SubtitleBlock::new(index, time_code, text_lines), cursor))
    }

    /// Walk the content as SRT and report human-readable format issues
    /// (index drift, malformed time lines, missing text) without failing.
    pub fn validate_format(content: &str) -> Vec<String> {
        let lines: Vec<&str> = content.lines().collect();
        let mut issues = Vec::new();
        let mut cursor = 0;
        let mut expected_index = 1;

        while cursor < lines.len() {
            while cursor < lines.len() && lines[cursor].trim().is_empty() {
                cursor += 1;
            }
            if cursor >= lines.len() {
                break;
            }

            // Index line
            let index_line = lines[cursor].trim();
            match index_line.parse::<usize>() {
                Ok(index) if index > 0 => {
                    if index != expected_index {
                        issues.push(format!(
                            "Line {}: expected index {}, got {}",
                            cursor + 1,
                            expected_index,
                            index
                        ));
                    }
                }
                _ => {
                    issues.push(format!(
                        "Line {}: expected index, got '{}'",
                        cursor + 1,
                        index_line
                    ));
                    cursor += 1;
                    continue;
                }
            }
            cursor += 1;
            expected_index += 1;

            if cursor >= lines.len() {
                issues.push(format!("Line {}: missing time code after index", cursor));
                break;
            }

            // Time code line
            if !TimeCode::is_time_line(lines[cursor]) {
                issues.push(format!(
                    "Line {}: invalid time format '{}'",
                    cursor + 1,
                    lines[cursor].trim()
                ));
            }
            cursor += 1;

            // Text lines
            let mut text_line_count = 0;
            while cursor < lines.len() {
                let trimmed = lines[cursor].trim();
                if trimmed.is_empty() {
                    break;
                }
                if trimmed.chars().all(|c| c.is_ascii_digit())
                    && cursor + 1 < lines.len()
                    && TimeCode::is_time_line(lines[cursor + 1])
                {
                    break;
                }
                text_line_count += 1;
                cursor += 1;
            }

            if text_line_count == 0 {
                issues.push(format!("Line {}: no subtitle text found", cursor));
            }
        }

        issues
    }
}
