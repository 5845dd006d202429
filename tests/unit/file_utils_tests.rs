/*!
 * Tests for file utilities and export naming
 */

use anyhow::Result;
use std::path::Path;
use submovies::export::{resolve_output_filename, TranslationResult};
use submovies::file_utils::FileManager;
use submovies::subtitle_processor::SubtitleFormat;
use crate::common;

#[test]
fn test_fileExists_shouldDistinguishFilesAndDirs() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let file = common::create_test_file(dir.path(), "movie.srt", common::SAMPLE_SRT)?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(dir.path()));
    assert!(FileManager::dir_exists(dir.path()));
    Ok(())
}

#[test]
fn test_findSubtitleFiles_shouldIgnoreOtherExtensions() -> Result<()> {
    let dir = common::create_temp_dir()?;
    common::create_test_file(dir.path(), "b.vtt", common::SAMPLE_VTT)?;
    common::create_test_file(dir.path(), "a.srt", common::SAMPLE_SRT)?;
    common::create_test_file(dir.path(), "c.mkv", "")?;

    let files = FileManager::find_subtitle_files(dir.path())?;
    let names: Vec<String> = files
        .iter()
        .filter_map(|f| f.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();

    assert_eq!(names, vec!["a.srt", "b.vtt"]);
    Ok(())
}

#[test]
fn test_detectFormatFromExtension_withUnsupportedFile_shouldUseUserMessage() {
    let err = FileManager::detect_format_from_extension("clip.ass").unwrap_err();
    assert!(err.to_string().contains("Unsupported file type. Please upload .srt or .vtt"));
}

#[test]
fn test_resolveOutputFilename_extensionFollowsOriginalFormat() {
    let input = Path::new("show.vtt");

    assert_eq!(resolve_output_filename(None, Some(input), "fa", SubtitleFormat::Vtt), "show_fa.vtt");
    // Content decides the format, not the input's extension
    assert_eq!(resolve_output_filename(None, Some(input), "fa", SubtitleFormat::Srt), "show_fa.srt");
    assert_eq!(resolve_output_filename(None, None, "", SubtitleFormat::Srt), "translated_subtitle_trans.srt");
}

#[test]
fn test_resolveOutputFilename_withExplicitName_shouldFixExtension() {
    assert_eq!(resolve_output_filename(Some("Persian.SRT"), None, "fa", SubtitleFormat::Srt), "Persian.SRT");
    assert_eq!(resolve_output_filename(Some("Persian.SRT"), None, "fa", SubtitleFormat::Vtt), "Persian.vtt");
    assert_eq!(resolve_output_filename(Some("final.v2"), None, "fa", SubtitleFormat::Vtt), "final.v2.vtt");
}

#[test]
fn test_translationResult_sideBySide_shouldShowBothTexts() {
    let result = TranslationResult::new("Hello", "سلام", SubtitleFormat::Srt);

    let view = result.side_by_side(12);

    assert!(view.starts_with("Original"));
    assert!(view.contains("Hello        | سلام"));
    assert_eq!(result.output_filename(None, None, "fa"), "translated_subtitle_fa.srt");
}
