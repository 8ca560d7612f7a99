/*!
 * Error types for the srtproc application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while parsing SRT content.
///
/// Parse errors are fatal for the file being parsed but never abort a
/// batch run; the controller isolates them per file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Subtitle index line is not a positive integer
    #[error("Line {line}: expected subtitle index, got '{found}'")]
    InvalidIndex {
        /// 1-based line number in the source file
        line: usize,
        /// The offending line content
        found: String,
    },

    /// Time code line does not match `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    #[error("Line {line}: invalid time format '{found}'")]
    InvalidTimeCode {
        /// 1-based line number in the source file
        line: usize,
        /// The offending line content
        found: String,
    },

    /// A numeric time field is outside its valid range
    #[error("Line {line}: time component out of range in '{found}'")]
    TimeOutOfRange {
        /// 1-based line number in the source file
        line: usize,
        /// The offending time code text
        found: String,
    },

    /// A block ended with no text lines
    #[error("Line {line}: no subtitle text found")]
    EmptyBlock {
        /// 1-based line number in the source file
        line: usize,
    },

    /// Input ended in the middle of a block
    #[error("Line {line}: unexpected end of input after subtitle index")]
    UnexpectedEof {
        /// 1-based line number in the source file
        line: usize,
    },
}

impl ParseError {
    /// Line number the error points at.
    pub fn line_number(&self) -> usize {
        match self {
            ParseError::InvalidIndex { line, .. }
            | ParseError::InvalidTimeCode { line, .. }
            | ParseError::TimeOutOfRange { line, .. }
            | ParseError::EmptyBlock { line }
            | ParseError::UnexpectedEof { line } => *line,
        }
    }
}

/// Errors raised while building a `ProcessingConfig`.
///
/// Configuration errors surface before any file is touched.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown language token
    #[error("Unknown language: '{0}' (expected auto, zh, en, ko or ja)")]
    UnknownLanguage(String),

    /// Unknown content-type token
    #[error("Unknown content type: '{0}' (expected adult or children)")]
    UnknownContentType(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from SRT parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
