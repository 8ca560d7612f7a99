/*!
 * Violation report export.
 *
 * Renders a validation report plus its source document as an annotated
 * SRT file: a summary header block followed by each violating block with
 * a `# VIOLATIONS:` comment line ahead of its text. Pure presentation
 * over the validator's output.
 */

use std::path::{Path, PathBuf};

use crate::subtitle::SrtDocument;
use crate::validator::{ValidationReport, Violation};

/// Default output path for a violation report: `<stem>-violation.srt`
/// next to the input file.
pub fn default_violation_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "srt".to_string());
    input.with_file_name(format!("{stem}-violation.{extension}"))
}

fn status_icon(compliance_rate: f64) -> &'static str {
    if compliance_rate >= 90.0 {
        "✅"
    } else if compliance_rate >= 70.0 {
        "⚠️"
    } else {
        "❌"
    }
}

// Short label for the per-block comment line; the block index is already
// implied by the surrounding block.
fn violation_label(violation: &Violation) -> String {
    match violation {
        Violation::CharacterLimit {
            line_number,
            count,
            limit,
            language,
            ..
        } => format!("Line {line_number} character limit ({count} > {limit} {language})"),
        Violation::ReadingSpeed { speed, limit, .. } => {
            format!("Reading speed ({speed:.1} > {limit} chars/sec)")
        }
    }
}

/// Render the violating blocks of a document as annotated SRT content.
///
/// The first block is a synthetic summary; every following block keeps
/// its original index and time code so violations can be located in the
/// source file.
pub fn render_violation_srt(
    document: &SrtDocument,
    report: &ValidationReport,
    speed_check_enabled: bool,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    let compliance_rate = report.compliance_rate();

    lines.push("1".to_string());
    lines.push("00:00:00,000 --> 00:00:05,000".to_string());
    lines.push("=== VIOLATION ANALYSIS SUMMARY ===".to_string());
    lines.push(format!(
        "{} Compliance: {:.1}% ({}/{} blocks)",
        status_icon(compliance_rate),
        compliance_rate,
        report.compliant_blocks(),
        report.total_blocks,
    ));
    lines.push(format!("⚠️ Total Violations: {}", report.warning_count()));
    lines.push(format!(
        "📊 Character Limit: {} violations",
        report.character_violation_count()
    ));
    if speed_check_enabled {
        lines.push(format!(
            "⏱️ Reading Speed: {} violations",
            report.speed_violation_count()
        ));
    }
    lines.push(String::new());

    for block_index in report.violating_block_indices() {
        let Some(block) = document.blocks.iter().find(|b| b.index == block_index) else {
            continue;
        };

        lines.push(block.index.to_string());
        lines.push(block.time_code.to_string());

        let labels: Vec<String> = report
            .violations_for_block(block_index)
            .into_iter()
            .map(violation_label)
            .collect();
        lines.push(format!("# VIOLATIONS: {}", labels.join(", ")));

        lines.extend(block.lines.iter().cloned());
        lines.push(String::new());
    }

    lines.join("\n")
}
