use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleFormat;

// @module: File and directory utilities

/// Message shown for any input file that is not .srt or .vtt
pub const UNSUPPORTED_FILE_MESSAGE: &str = "Unsupported file type. Please upload .srt or .vtt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @returns: Subtitle format implied by the file extension
    pub fn detect_format_from_extension<P: AsRef<Path>>(path: P) -> Result<SubtitleFormat, SubtitleError> {
        path.as_ref()
            .extension()
            .and_then(|ext| SubtitleFormat::from_extension(&ext.to_string_lossy()))
            .ok_or_else(|| SubtitleError::Validation(UNSUPPORTED_FILE_MESSAGE.to_string()))
    }

    /// Find .srt and .vtt files below a directory, in path order
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::detect_format_from_extension(path).is_ok() {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string, dropping a leading byte-order mark
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;

        match content.strip_prefix('\u{FEFF}') {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(content),
        }
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
