/*!
 * Common test utilities for the submovies test suite
 */

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use submovies::errors::ProviderError;
use submovies::translation::{CancelHandle, ChunkTranslator};

/// Two-cue SRT document used across the suite
pub const SAMPLE_SRT: &str = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:03,000 --> 00:00:04,000\n5 dollars\n";

/// WebVTT document with a NOTE block and a cue identifier
pub const SAMPLE_VTT: &str = "WEBVTT\n\nNOTE test\n\nintro\n00:00:01.000 --> 00:00:02.000\nHello\n\n00:00:03.000 --> 00:00:04.500\nGood night\n";

/// Route library logs through env_logger; safe to call from every test
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// SRT document with `count` numbered cues, one second apart
pub fn numbered_srt(count: usize) -> String {
    (1..=count)
        .map(|i| {
            format!(
                "{}\n00:{:02}:{:02},000 --> 00:{:02}:{:02},500\nLine {}",
                i,
                i / 60,
                i % 60,
                i / 60,
                i % 60,
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// What a scripted translator does with one call
#[derive(Debug, Clone)]
pub enum Step {
    /// Return the chunk unchanged
    Echo,
    /// Return this text instead of the chunk
    Reply(String),
    /// Fail with this error
    Fail(ProviderErrorKind),
}

/// Cloneable stand-in for the provider error to raise
#[derive(Debug, Clone, Copy)]
pub enum ProviderErrorKind {
    Blocked,
    Empty,
    Api,
}

impl ProviderErrorKind {
    fn to_error(self) -> ProviderError {
        match self {
            Self::Blocked => ProviderError::ContentBlocked {
                reason: "SAFETY".to_string(),
                details: "No further details.".to_string(),
            },
            Self::Empty => ProviderError::EmptyResponse,
            Self::Api => ProviderError::ApiError {
                status_code: 500,
                message: "Internal error".to_string(),
            },
        }
    }
}

/// Translator following a per-call script; calls past the end echo.
///
/// Every received chunk is recorded, and an optional cancel handle is
/// triggered once a given number of calls has completed.
#[derive(Clone, Default)]
pub struct ScriptedTranslator {
    steps: Arc<Vec<Step>>,
    received: Arc<Mutex<Vec<String>>>,
    cancel_after: Option<(usize, CancelHandle)>,
}

impl ScriptedTranslator {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::new(steps),
            ..Self::default()
        }
    }

    pub fn echo() -> Self {
        Self::new(Vec::new())
    }

    /// Request cancellation right after call number `calls` returns
    pub fn cancel_after(mut self, calls: usize, handle: CancelHandle) -> Self {
        self.cancel_after = Some((calls, handle));
        self
    }

    /// Chunks received so far, in order
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChunkTranslator for ScriptedTranslator {
    async fn translate_chunk(&self, text: &str) -> Result<String, ProviderError> {
        let call = {
            let mut received = self.received.lock().unwrap();
            received.push(text.to_string());
            received.len()
        };

        let result = match self.steps.get(call - 1).cloned().unwrap_or(Step::Echo) {
            Step::Echo => Ok(text.to_string()),
            Step::Reply(reply) => Ok(reply),
            Step::Fail(kind) => Err(kind.to_error()),
        };

        if let Some((after, handle)) = &self.cancel_after {
            if call == *after {
                handle.cancel();
            }
        }

        result
    }
}
