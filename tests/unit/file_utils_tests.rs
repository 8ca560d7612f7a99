/*!
 * Tests for file system utilities
 */

use std::fs;

use anyhow::Result;
use srtproc::file_utils::FileManager;

use crate::common;

/// Test existence probes for files and directories
#[test]
fn test_file_exists_withRealAndMissingPaths_shouldAnswer() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir, "probe.srt", "content")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(dir.join("missing.srt")));
    assert!(FileManager::dir_exists(&dir));
    assert!(!FileManager::dir_exists(&file));
    Ok(())
}

/// Test derived output path naming
#[test]
fn test_generate_output_path_withSrtFile_shouldAppendProcessed() {
    let output = FileManager::generate_output_path("/videos/episode01.srt");
    assert_eq!(output.to_string_lossy(), "/videos/episode01_processed.srt");
}

/// Test recursive discovery, extension filter and ordering
#[test]
fn test_find_files_withNestedTree_shouldReturnSortedSrtFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "b.srt", "x")?;
    common::create_test_file(&dir, "a.SRT", "x")?;
    common::create_test_file(&dir, "notes.txt", "x")?;
    fs::create_dir(dir.join("nested"))?;
    common::create_test_file(&dir.join("nested"), "c.srt", "x")?;

    let files = FileManager::find_files(&dir, "srt")?;
    assert_eq!(files.len(), 3);
    // Case-insensitive on the extension, sorted by path
    assert!(files[0].ends_with("a.SRT"));
    assert!(files[1].ends_with("b.srt"));
    assert!(files[2].ends_with("nested/c.srt"));
    Ok(())
}

/// Test UTF-8 BOM stripping on read
#[test]
fn test_read_subtitle_file_withBom_shouldStripAndLabelEncoding() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("1\n00:00:01,000 --> 00:00:02,000\nHi\n".as_bytes());
    let path = dir.join("bom.srt");
    fs::write(&path, bytes)?;

    let (content, encoding) = FileManager::read_subtitle_file(&path)?;
    assert!(content.starts_with('1'));
    assert_eq!(encoding, "utf-8-sig");
    Ok(())
}

/// Test that writing creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out/sub/result.srt");

    FileManager::write_to_file(&target, "payload")?;
    assert_eq!(fs::read_to_string(&target)?, "payload");
    Ok(())
}
