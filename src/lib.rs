/*!
 * # srtproc - SRT Subtitle Processor
 *
 * A Rust library for reformatting and validating SRT subtitle files.
 *
 * ## Features
 *
 * - Parse and serialize SRT timed-text files losslessly
 * - Detect the subtitle language from script distribution (Chinese,
 *   English, Korean, Japanese), per document, block, or line
 * - Reformat text with per-language line engines: dialogue-marker
 *   normalization, smart merging, intelligent line breaking under
 *   character budgets, and terminal punctuation repair
 * - Remove SDH (hearing-impaired) markers and blocks
 * - Validate against character-limit and reading-speed compliance caps
 * - Export annotated violation reports as SRT
 * - Batch processing for whole directories
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Languages, content types, and the limit tables
 * - `time_code`: SRT time-code parsing and formatting
 * - `parser`: Block/document parsing and format validation
 * - `subtitle`: Subtitle block and document models
 * - `language_detector`: Script-distribution language classification
 * - `sdh`: SDH marker detection and removal
 * - `engine`: Per-language line engines:
 *   - `engine::chinese`, `engine::english`, `engine::korean`,
 *     `engine::japanese`
 * - `validator`: Compliance validation
 * - `report`: Violation report export
 * - `pipeline`: Document processing pipeline
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod engine;
pub mod errors;
pub mod file_utils;
pub mod language_detector;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod sdh;
pub mod subtitle;
pub mod time_code;
pub mod validator;

// Re-export main types for easier usage
pub use app_config::{ContentType, Language, LanguageChoice, ProcessingConfig};
pub use errors::{AppError, ConfigError, ParseError};
pub use parser::SrtParser;
pub use pipeline::Pipeline;
pub use subtitle::{SrtDocument, SubtitleBlock};
pub use time_code::TimeCode;
pub use validator::{ValidationReport, Validator, Violation};
