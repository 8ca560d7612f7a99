/*!
 * Integration tests for the end-to-end single-file processing workflow
 */

use anyhow::Result;

use srtproc::app_controller::Controller;
use srtproc::file_utils::FileManager;
use srtproc::{ProcessingConfig, SrtParser};

use crate::common;

/// Test processing a file to an explicit output path
#[tokio::test]
async fn test_run_withExplicitOutput_shouldWriteReformattedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_english_subtitle(&dir, "episode.srt")?;
    let output = dir.join("episode.clean.srt");

    let controller = Controller::new(ProcessingConfig::default());
    controller.run(input, Some(output.clone())).await?;

    assert!(output.exists(), "Output file should exist");
    let (content, _) = FileManager::read_subtitle_file(&output)?;
    let document = SrtParser::parse(&content)?;
    assert_eq!(document.total_blocks(), 3);
    assert_eq!(document.blocks[0].lines, vec!["This is a test subtitle."]);
    Ok(())
}

/// Test the derived default output path
#[tokio::test]
async fn test_run_withoutOutput_shouldDeriveProcessedPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_english_subtitle(&dir, "episode.srt")?;

    let controller = Controller::new(ProcessingConfig::default());
    controller.run(input, None).await?;

    assert!(dir.join("episode_processed.srt").exists());
    Ok(())
}

/// Test that SDH blocks are dropped and the survivors renumbered
#[tokio::test]
async fn test_run_withSdhContent_shouldRemoveSdhBlocks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let content = "1\n00:00:01,000 --> 00:00:03,000\n♪♪\n\n2\n00:00:04,000 --> 00:00:06,000\n(sighs) I'm home\n\n3\n00:00:07,000 --> 00:00:09,000\n[door slams]\n";
    let input = common::create_test_file(&dir, "sdh.srt", content)?;
    let output = dir.join("sdh.out.srt");

    let controller = Controller::new(ProcessingConfig::default());
    controller.run(input, Some(output.clone())).await?;

    let (written, _) = FileManager::read_subtitle_file(&output)?;
    let document = SrtParser::parse(&written)?;
    assert_eq!(document.total_blocks(), 1);
    assert_eq!(document.blocks[0].index, 1);
    assert_eq!(document.blocks[0].lines, vec!["I'm home"]);
    Ok(())
}

/// Test that --keep-sdh style configuration preserves SDH blocks
#[tokio::test]
async fn test_run_withKeepSdh_shouldPreserveSdhBlocks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let content = "1\n00:00:01,000 --> 00:00:03,000\n♪♪\n\n2\n00:00:04,000 --> 00:00:06,000\nStill here\n";
    let input = common::create_test_file(&dir, "keep.srt", content)?;
    let output = dir.join("keep.out.srt");

    let config = ProcessingConfig {
        remove_sdh: false,
        ..ProcessingConfig::default()
    };
    Controller::new(config).run(input, Some(output.clone())).await?;

    let (written, _) = FileManager::read_subtitle_file(&output)?;
    let document = SrtParser::parse(&written)?;
    assert_eq!(document.total_blocks(), 2);
    Ok(())
}

/// Test the error path for a missing input file
#[tokio::test]
async fn test_run_withMissingInput_shouldFail() {
    let controller = Controller::new(ProcessingConfig::default());
    let result = controller
        .run(std::path::PathBuf::from("/no/such/file.srt"), None)
        .await;
    assert!(result.is_err());
}
