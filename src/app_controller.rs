/*!
 * Application controller.
 *
 * Drives the pipeline for single files and batch directories: reads and
 * decodes input, runs processing or check-only validation, writes output
 * and violation reports, and aggregates batch results. Batch files run
 * as parallel blocking tasks with per-file failure isolation.
 */

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::ProcessingConfig;
use crate::file_utils::FileManager;
use crate::language_detector;
use crate::pipeline::Pipeline;
use crate::report;
use crate::validator::ValidationReport;

// Upper bound on concurrently processed batch files.
const MAX_CONCURRENT_FILES: usize = 4;

/// Where to write the annotated violation SRT, if anywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViolationOutput {
    /// Do not write a violation file
    #[default]
    None,
    /// Derive `<stem>-violation.srt` next to the input
    Auto,
    /// Explicit output path
    Path(PathBuf),
}

impl ViolationOutput {
    fn resolve(&self, input: &Path) -> Option<PathBuf> {
        match self {
            Self::None => None,
            Self::Auto => Some(report::default_violation_path(input)),
            Self::Path(path) => Some(path.clone()),
        }
    }
}

pub struct Controller {
    config: ProcessingConfig,
}

impl Controller {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Process a single file and write the reformatted SRT.
    pub async fn run(&self, input_file: PathBuf, output_file: Option<PathBuf>) -> Result<()> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output = process_single(self.config.clone(), &input_file, output_file)?;
        info!("Processed {:?} -> {:?}", input_file, output);
        Ok(())
    }

    /// Validate a single file without rewriting it. Prints the report to
    /// stdout and optionally writes the annotated violation SRT.
    pub async fn check(
        &self,
        input_file: PathBuf,
        violation_output: ViolationOutput,
    ) -> Result<ValidationReport> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        let (report, document) = check_single(self.config.clone(), &input_file)?;
        print_report(&input_file, &report, &self.config);

        if let Some(violation_path) = violation_output.resolve(&input_file) {
            if report.is_compliant() {
                info!("No violations found, skipping violation file creation");
            } else {
                let rendered = report::render_violation_srt(
                    &document,
                    &report,
                    !self.config.no_speed_check,
                );
                FileManager::write_to_file(&violation_path, &rendered)?;
                println!("Violations saved: {}", violation_path.display());
            }
        }

        Ok(report)
    }

    /// Process every `.srt` file under a directory in parallel workers.
    /// A failing file is counted and logged, never aborts the batch.
    pub async fn run_batch(&self, input_dir: PathBuf) -> Result<()> {
        let files = self.batch_files(&input_dir)?;
        let progress = batch_progress_bar(files.len() as u64);

        let results: Vec<(PathBuf, Result<PathBuf>)> = stream::iter(files)
            .map(|file| {
                let config = self.config.clone();
                let progress = progress.clone();
                async move {
                    let task_file = file.clone();
                    let outcome = tokio::task::spawn_blocking(move || {
                        process_single(config, &task_file, None)
                    })
                    .await
                    .context("Batch worker task failed")
                    .and_then(|result| result);

                    progress.inc(1);
                    (file, outcome)
                }
            })
            .buffer_unordered(MAX_CONCURRENT_FILES)
            .collect()
            .await;

        progress.finish_with_message("Batch processing complete");

        let mut success_count = 0;
        let mut error_count = 0;
        for (file, outcome) in &results {
            match outcome {
                Ok(output) => {
                    success_count += 1;
                    info!("Processed {:?} -> {:?}", file, output);
                }
                Err(e) => {
                    error_count += 1;
                    error!("Error processing file {:?}: {:#}", file, e);
                }
            }
        }

        info!(
            "Batch processing completed: {} processed, {} errors",
            success_count, error_count
        );
        println!(
            "Batch complete: {} processed, {} errors",
            success_count, error_count
        );
        Ok(())
    }

    /// Check every `.srt` file under a directory and print per-file
    /// compliance lines plus an aggregate summary.
    pub async fn check_batch(
        &self,
        input_dir: PathBuf,
        violation_output: ViolationOutput,
    ) -> Result<()> {
        let files = self.batch_files(&input_dir)?;
        println!("Checking {} SRT files in {}", files.len(), input_dir.display());

        let mut checked_count = 0;
        let mut failed_count = 0;
        let mut total_violations = 0;

        for file in &files {
            match check_single(self.config.clone(), file) {
                Ok((report, document)) => {
                    checked_count += 1;
                    total_violations += report.warning_count();

                    let rate = report.compliance_rate();
                    let status = if rate >= 90.0 {
                        "✅"
                    } else if rate >= 70.0 {
                        "⚠️"
                    } else {
                        "❌"
                    };
                    let name = file
                        .file_name()
                        .map(|f| f.to_string_lossy().into_owned())
                        .unwrap_or_else(|| file.display().to_string());
                    println!(
                        "{status} {name} - {rate:.1}% ({} violations)",
                        report.warning_count()
                    );

                    if violation_output != ViolationOutput::None && !report.is_compliant() {
                        // Batch mode always derives per-file paths.
                        let violation_path = report::default_violation_path(file);
                        let rendered = report::render_violation_srt(
                            &document,
                            &report,
                            !self.config.no_speed_check,
                        );
                        if let Err(e) = FileManager::write_to_file(&violation_path, &rendered) {
                            warn!("Failed to write violation file {:?}: {:#}", violation_path, e);
                        }
                    }
                }
                Err(e) => {
                    failed_count += 1;
                    error!("Error checking file {:?}: {:#}", file, e);
                }
            }
        }

        println!();
        println!("Batch checking complete:");
        println!("  Checked: {checked_count}");
        println!("  Failed: {failed_count}");
        println!("  Total violations: {total_violations}");
        Ok(())
    }

    fn batch_files(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {:?}",
                input_dir
            ));
        }

        let files = FileManager::find_files(input_dir, "srt")?;
        if files.is_empty() {
            return Err(anyhow::anyhow!(
                "No SRT files found in directory: {:?}",
                input_dir
            ));
        }
        Ok(files)
    }
}

fn process_single(
    config: ProcessingConfig,
    input_file: &Path,
    output_file: Option<PathBuf>,
) -> Result<PathBuf> {
    let (content, encoding) = FileManager::read_subtitle_file(input_file)?;
    if encoding != "utf-8" {
        info!("Read {:?} as {}", input_file, encoding);
    }

    let document = Pipeline::new(config)
        .process(&content)
        .with_context(|| format!("Failed to process {:?}", input_file))?;

    let output = output_file.unwrap_or_else(|| FileManager::generate_output_path(input_file));
    FileManager::write_to_file(&output, &document.to_srt_string())?;
    Ok(output)
}

fn check_single(
    config: ProcessingConfig,
    input_file: &Path,
) -> Result<(ValidationReport, crate::subtitle::SrtDocument)> {
    let (content, _encoding) = FileManager::read_subtitle_file(input_file)?;

    let document = crate::parser::SrtParser::parse(&content)
        .with_context(|| format!("Failed to parse {:?}", input_file))?;

    let stats = language_detector::language_statistics(&document);
    debug!(
        "language distribution for {:?}: {:?} over {} blocks (mixed: {})",
        input_file, stats.distribution, stats.block_count, stats.mixed
    );

    let (prepared, report) = Pipeline::new(config).check_document(document);
    Ok((report, prepared))
}

fn print_report(input_file: &Path, report: &ValidationReport, config: &ProcessingConfig) {
    println!("Checking: {}", input_file.display());
    if let Some(language) = report.detected_language {
        println!("Language: {}", language.display_name());
    }
    println!("Total blocks: {}", report.total_blocks);
    println!();
    println!("=== VALIDATION REPORT ===");

    let char_count = report.character_violation_count();
    println!("Character Limit Violations: {char_count}");
    for violation in report
        .violations
        .iter()
        .filter(|v| v.is_character_limit())
        .take(10)
    {
        println!("  📏 {violation}");
    }
    if char_count > 10 {
        println!("  ... and {} more character limit violations", char_count - 10);
    }

    println!();
    if config.no_speed_check {
        println!("Reading Speed Validation: disabled");
    } else {
        let speed_count = report.speed_violation_count();
        println!("Reading Speed Violations: {speed_count}");
        for violation in report
            .violations
            .iter()
            .filter(|v| v.is_reading_speed())
            .take(10)
        {
            println!("  ⏱️  {violation}");
        }
        if speed_count > 10 {
            println!("  ... and {} more speed violations", speed_count - 10);
        }
    }

    println!();
    let rate = report.compliance_rate();
    let status = if rate >= 90.0 {
        "✅"
    } else if rate >= 70.0 {
        "⚠️"
    } else {
        "❌"
    };
    println!(
        "{status} Compliance: {rate:.1}% ({}/{} blocks)",
        report.compliant_blocks(),
        report.total_blocks
    );
    println!("⚠️  Total Violations: {}", report.warning_count());
}

fn batch_progress_bar(total: u64) -> ProgressBar {
    let progress = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
        .or_else(|_| {
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
        })
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style.progress_chars("█▓▒░"));
    progress.set_message("Processing files");
    progress
}
