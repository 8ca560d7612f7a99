// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{ContentType, LanguageChoice, ProcessingConfig};
use crate::app_controller::{Controller, ViolationOutput};

mod app_config;
mod app_controller;
mod engine;
mod errors;
mod file_utils;
mod language_detector;
mod parser;
mod pipeline;
mod report;
mod sdh;
mod subtitle;
mod time_code;
mod validator;

/// CLI Wrapper for LanguageChoice to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLanguage {
    Auto,
    Zh,
    En,
    Ko,
    Ja,
}

impl From<CliLanguage> for LanguageChoice {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::Auto => LanguageChoice::Auto,
            CliLanguage::Zh => LanguageChoice::Fixed(app_config::Language::Chinese),
            CliLanguage::En => LanguageChoice::Fixed(app_config::Language::English),
            CliLanguage::Ko => LanguageChoice::Fixed(app_config::Language::Korean),
            CliLanguage::Ja => LanguageChoice::Fixed(app_config::Language::Japanese),
        }
    }
}

/// CLI Wrapper for ContentType to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliContentType {
    Adult,
    Children,
}

impl From<CliContentType> for ContentType {
    fn from(cli_content_type: CliContentType) -> Self {
        match cli_content_type {
            CliContentType::Adult => ContentType::Adult,
            CliContentType::Children => ContentType::Children,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for srtproc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// srtproc - SRT Subtitle Processor
///
/// Reformats SRT subtitles with language-aware line breaking and merging,
/// and validates them against character-limit and reading-speed caps.
#[derive(Parser, Debug)]
#[command(name = "srtproc")]
#[command(version = "1.0.0")]
#[command(about = "Multi-language SRT subtitle processing tool")]
#[command(long_about = "srtproc reformats SRT subtitle files with language-aware line \
breaking and merging, removes SDH markers, and validates against broadcast-style \
character-limit and reading-speed caps.

EXAMPLES:
    srtproc movie.srt                          # Process with auto-detected language
    srtproc movie.srt fixed.srt                # Explicit output path
    srtproc -l zh movie.srt                    # Force Chinese rules
    srtproc --batch /subs/                     # Process a whole directory
    srtproc --check-only movie.srt             # Validate without rewriting
    srtproc --check-only -o movie.srt          # Also write movie-violation.srt
    srtproc --content-type children movie.srt  # Children's reading-speed caps
    srtproc completions bash > srtproc.bash    # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input SRT file to process
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file path (defaults to <stem>_processed.srt)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Process all .srt files in a directory
    #[arg(short, long, value_name = "DIR", conflicts_with = "input")]
    batch: Option<PathBuf>,

    /// Subtitle language (auto-detected by default)
    #[arg(short, long, value_enum, default_value = "auto")]
    language: CliLanguage,

    /// Content type for reading-speed thresholds
    #[arg(short, long, value_enum, default_value = "adult")]
    content_type: CliContentType,

    /// SDH mode: allow the longer SDH character limits
    #[arg(long)]
    sdh: bool,

    /// Keep SDH blocks and markers instead of removing them
    #[arg(long)]
    keep_sdh: bool,

    /// Disable reading-speed validation
    #[arg(long)]
    no_speed_check: bool,

    /// Disable terminal punctuation repair
    #[arg(long)]
    no_punct_fix: bool,

    /// Only validate subtitles without processing
    #[arg(long)]
    check_only: bool,

    /// Write violating blocks to an annotated SRT file
    /// (auto-named <stem>-violation.srt when no path is given)
    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "auto"
    )]
    output_violation: Option<String>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn violation_output(option: Option<String>) -> ViolationOutput {
    match option.as_deref() {
        None => ViolationOutput::None,
        Some("auto") | Some("") => ViolationOutput::Auto,
        Some(path) => ViolationOutput::Path(PathBuf::from(path)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtproc", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(log_level) = cli.log_level.clone() {
        log::set_max_level(log_level.into());
    }

    let config = ProcessingConfig {
        language: cli.language.into(),
        content_type: cli.content_type.into(),
        sdh_mode: cli.sdh,
        remove_sdh: !cli.keep_sdh,
        no_speed_check: cli.no_speed_check,
        no_punct_fix: cli.no_punct_fix,
    };

    let controller = Controller::new(config);
    let violations = violation_output(cli.output_violation);

    if let Some(batch_dir) = cli.batch {
        if cli.check_only {
            controller.check_batch(batch_dir, violations).await?;
        } else {
            controller.run_batch(batch_dir).await?;
        }
        return Ok(());
    }

    let input = cli
        .input
        .ok_or_else(|| anyhow!("INPUT is required unless --batch is specified"))?;

    if cli.check_only {
        controller.check(input, violations).await?;
    } else {
        controller.run(input, cli.output).await?;
    }

    Ok(())
}
