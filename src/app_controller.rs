use anyhow::{anyhow, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::{AppError, SubtitleError};
use crate::export::{resolve_output_filename, TranslationResult, DEFAULT_COLUMN_WIDTH};
use crate::file_utils::FileManager;
use crate::subtitle_processor::{detect_format, SubtitleFormat};
use crate::translation::{CancelHandle, ChunkTranslator, ChunkedTranslator, TranslationOutcome, TranslationService};

// @module: Application controller for subtitle translation

/// Message for a run started without text or without credentials
pub const MISSING_INPUT_MESSAGE: &str = "API Key and Subtitle Text are required.";

/// What to do with a finished translation
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    // @field: Explicit output name or path; derived from the input when absent
    pub output: Option<PathBuf>,
    // @field: Replace an existing output file
    pub force_overwrite: bool,
    // @field: Print the translation instead of writing a file
    pub to_stdout: bool,
    // @field: Print the side-by-side comparison
    pub compare: bool,
}

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translator receiving each chunk
    translator: Arc<dyn ChunkTranslator>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(config.translation.clone(), config.translation_options())?;
        Ok(Self::with_translator(config, Arc::new(service)))
    }

    /// Create a controller around an existing translator
    pub fn with_translator(config: Config, translator: Arc<dyn ChunkTranslator>) -> Self {
        Self { config, translator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fail fast when the translation backend cannot be reached
    pub async fn check_connection(&self) -> Result<()> {
        info!(
            "Checking connection to {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.model
        );

        self.translator.check_connection().await.map_err(|e| {
            anyhow!(
                "Failed to connect to {}: {}",
                self.config.translation.provider.display_name(),
                e
            )
        })
    }

    /// Classify input text and reject it before any request is made
    pub fn prepare_input(&self, text: &str) -> Result<SubtitleFormat, AppError> {
        if text.trim().is_empty() {
            return Err(SubtitleError::Validation(MISSING_INPUT_MESSAGE.to_string()).into());
        }

        let char_count = text.chars().count();
        if char_count > self.config.char_count_warning_threshold {
            warn!(
                "Input is {} characters (over {}); the translation may take a while and cost more",
                char_count, self.config.char_count_warning_threshold
            );
        }

        Ok(detect_format(text)?)
    }

    /// Translate subtitle text.
    ///
    /// Returns `None` when the run was cancelled; the partial text of a
    /// cancelled run is dropped.
    pub async fn translate_text<F>(
        &self,
        original: &str,
        cancel: &CancelHandle,
        progress_callback: F,
    ) -> Result<Option<TranslationResult>, AppError>
    where
        F: Fn(usize, usize),
    {
        let format = self.prepare_input(original)?;
        let translator = ChunkedTranslator::new(Arc::clone(&self.translator), self.config.translation_options());

        match translator
            .translate_document(original, format, cancel, progress_callback)
            .await
        {
            Ok(TranslationOutcome::Completed(translated)) => {
                Ok(Some(TranslationResult::new(original, translated, format)))
            }
            Ok(TranslationOutcome::Cancelled { completed_chunks, total_chunks, .. }) => {
                warn!(
                    "Translation cancelled ({} of {} chunks done); nothing was written",
                    completed_chunks, total_chunks
                );
                Ok(None)
            }
            Err(e) => {
                error!("Translation failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Run the main workflow for one subtitle file.
    ///
    /// Returns the written path, or `None` when nothing was written (stdout
    /// output, skipped file or cancellation).
    pub async fn run(&self, input_file: PathBuf, options: &OutputOptions, cancel: &CancelHandle) -> Result<Option<PathBuf>> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, options, &multi_progress, cancel).await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        options: &OutputOptions,
        multi_progress: &MultiProgress,
        cancel: &CancelHandle,
    ) -> Result<Option<PathBuf>> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        FileManager::detect_format_from_extension(input_file).map_err(AppError::from)?;

        let content = FileManager::read_to_string(input_file)?;
        let format = detect_format(&content).map_err(AppError::from)?;

        let output_path = self.output_path(input_file, options, format);
        if !options.to_stdout && output_path.exists() && !options.force_overwrite {
            warn!(
                "Skipping {}, output already exists (use -f to force overwrite)",
                output_path.display()
            );
            return Ok(None);
        }

        info!(
            "Translating {} ({}) into '{}' with {} - {}",
            input_file.display(),
            format,
            self.config.target_language,
            self.config.translation.provider.display_name(),
            self.config.translation.model
        );

        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let result = self
            .translate_text(&content, cancel, move |completed, total| {
                pb.set_length(total as u64);
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_and_clear();

        let result = match result.map_err(|e| anyhow!(e.user_message()))? {
            Some(result) => result,
            None => return Ok(None),
        };

        if options.compare {
            println!("{}", result.side_by_side(DEFAULT_COLUMN_WIDTH));
        }

        if options.to_stdout {
            println!("{}", result.translated);
            return Ok(None);
        }

        FileManager::write_to_file(&output_path, &result.translated)?;

        info!(
            "Success: {} ({})",
            output_path.display(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(Some(output_path))
    }

    /// Output path for one input: an explicit path keeps its directory,
    /// otherwise the file goes next to the input.
    fn output_path(&self, input_file: &Path, options: &OutputOptions, format: SubtitleFormat) -> PathBuf {
        let target_language = &self.config.target_language;

        match &options.output {
            Some(explicit) => {
                let name = explicit
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string());
                let resolved = resolve_output_filename(name.as_deref(), Some(input_file), target_language, format);
                explicit
                    .parent()
                    .map(|parent| parent.join(&resolved))
                    .unwrap_or_else(|| PathBuf::from(&resolved))
            }
            None => {
                let resolved = resolve_output_filename(None, Some(input_file), target_language, format);
                input_file
                    .parent()
                    .map(|parent| parent.join(&resolved))
                    .unwrap_or_else(|| PathBuf::from(&resolved))
            }
        }
    }

    /// Drop files that are the default output of another file in the list,
    /// so a folder run never translates its own earlier results.
    fn exclude_previous_outputs(&self, files: Vec<PathBuf>) -> Vec<PathBuf> {
        let target_language = &self.config.target_language;
        let outputs: HashSet<PathBuf> = files
            .iter()
            .flat_map(|file| {
                [SubtitleFormat::Srt, SubtitleFormat::Vtt].into_iter().map(move |format| {
                    let name = resolve_output_filename(None, Some(file), target_language, format);
                    file.with_file_name(name)
                })
            })
            .collect();

        files
            .into_iter()
            .filter(|file| {
                let previous = outputs.contains(file);
                if previous {
                    debug!("Skipping {}, it is a translation output", file.display());
                }
                !previous
            })
            .collect()
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Translate every .srt/.vtt file below a directory.
    ///
    /// A failure on one file is logged and the rest still run; cancellation
    /// stops the whole folder.
    pub async fn run_folder(&self, input_dir: PathBuf, options: &OutputOptions, cancel: &CancelHandle) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let subtitle_files = self.exclude_previous_outputs(FileManager::find_subtitle_files(&input_dir)?);
        if subtitle_files.is_empty() {
            return Err(anyhow!("No .srt or .vtt files found in directory: {:?}", input_dir));
        }

        // Per-file names only make sense for a single file
        let options = OutputOptions {
            output: None,
            ..options.clone()
        };

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(subtitle_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for subtitle_file in subtitle_files.iter() {
            if cancel.is_cancelled() {
                warn!("Folder processing cancelled");
                break;
            }

            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.run_with_progress(subtitle_file, &options, &multi_progress, cancel).await {
                Ok(Some(path)) => {
                    debug!("Wrote {}", path.display());
                    summary.processed += 1;
                }
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed: {} processed, {} skipped, {} errors ({})",
            summary.processed,
            summary.skipped,
            summary.failed,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }
}

/// Counts from a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}
