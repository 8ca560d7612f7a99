/*!
 * Integration tests for batch folder processing
 */

use anyhow::Result;
use std::fs;

use srtproc::app_controller::{Controller, ViolationOutput};
use srtproc::ProcessingConfig;

use crate::common;

/// Test processing every SRT file in a directory tree
#[tokio::test]
async fn test_run_batch_withNestedFiles_shouldProcessAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_english_subtitle(&dir, "first.srt")?;
    fs::create_dir(dir.join("season2"))?;
    common::create_english_subtitle(&dir.join("season2"), "second.srt")?;
    common::create_test_file(&dir, "ignored.txt", "not a subtitle")?;

    let controller = Controller::new(ProcessingConfig::default());
    controller.run_batch(dir.clone()).await?;

    assert!(dir.join("first_processed.srt").exists());
    assert!(dir.join("season2/second_processed.srt").exists());
    assert!(!dir.join("ignored_processed.txt").exists());
    Ok(())
}

/// Test that one malformed file does not abort the batch
#[tokio::test]
async fn test_run_batch_withOneBadFile_shouldProcessTheRest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_english_subtitle(&dir, "good.srt")?;
    common::create_test_file(&dir, "broken.srt", "1\nnot a time code\nText\n")?;

    let controller = Controller::new(ProcessingConfig::default());
    controller.run_batch(dir.clone()).await?;

    assert!(dir.join("good_processed.srt").exists());
    assert!(!dir.join("broken_processed.srt").exists());
    Ok(())
}

/// Test the empty-directory error path
#[tokio::test]
async fn test_run_batch_withNoSrtFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_test_file(&dir, "readme.md", "nothing to do")?;

    let controller = Controller::new(ProcessingConfig::default());
    assert!(controller.run_batch(dir).await.is_err());
    Ok(())
}

/// Test the missing-directory error path
#[tokio::test]
async fn test_run_batch_withMissingDirectory_shouldFail() {
    let controller = Controller::new(ProcessingConfig::default());
    let result = controller
        .run_batch(std::path::PathBuf::from("/no/such/dir"))
        .await;
    assert!(result.is_err());
}

/// Test batch checking with per-file violation export
#[tokio::test]
async fn test_check_batch_withMixedFiles_shouldWriteViolationFilesForBadOnes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    common::create_english_subtitle(&dir, "good.srt")?;
    let bad = "1\n00:00:01,000 --> 00:00:11,000\nabcdefghij abcdefghij abcdefghij abcdefghij a\n";
    common::create_test_file(&dir, "bad.srt", bad)?;

    let controller = Controller::new(ProcessingConfig::default());
    controller
        .check_batch(dir.clone(), ViolationOutput::Auto)
        .await?;

    assert!(dir.join("bad-violation.srt").exists());
    assert!(!dir.join("good-violation.srt").exists());
    // Checking never rewrites the inputs
    assert!(!dir.join("bad_processed.srt").exists());
    Ok(())
}
