/*!
 * Chunked translation processing.
 *
 * This module splits a subtitle document into bounded groups of cues, sends
 * them one at a time to a translator, and reassembles the output. Chunks are
 * processed strictly in order with a single request in flight, and the run can
 * be cancelled cooperatively between chunks.
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{ProviderError, TranslationError};
use crate::format_converter::{internal_srt_to_vtt, vtt_to_internal_srt};
use crate::subtitle_processor::{is_vtt_metadata_block, split_into_blocks, SubtitleFormat, VTT_HEADER};

use super::core::TranslationOptions;
use super::formatting::fix_numbers;

/// Something that can translate one chunk of internal SRT text
#[async_trait]
pub trait ChunkTranslator: Send + Sync {
    /// Translate the chunk, keeping its cue structure
    async fn translate_chunk(&self, text: &str) -> Result<String, ProviderError>;

    /// Check that the backend answers before any chunk is sent
    async fn check_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

#[async_trait]
impl<T: ChunkTranslator + ?Sized> ChunkTranslator for Arc<T> {
    async fn translate_chunk(&self, text: &str) -> Result<String, ProviderError> {
        (**self).translate_chunk(text).await
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        (**self).check_connection().await
    }
}

/// Handle for requesting cancellation of a running translation
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect before the next chunk starts
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// How a run that did not fail came to an end
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    /// Every chunk was translated; numerals are normalized and the text is in
    /// the original format
    Completed(String),

    /// Stopped at a chunk boundary on request
    Cancelled {
        /// Raw translator output of the chunks finished before the stop
        partial: String,
        /// Number of chunks finished
        completed_chunks: usize,
        /// Number of chunks in the run
        total_chunks: usize,
    },
}

impl TranslationOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Final text, only for a completed run
    pub fn completed_text(&self) -> Option<&str> {
        match self {
            Self::Completed(text) => Some(text),
            Self::Cancelled { .. } => None,
        }
    }
}

/// Sequential chunk translator for whole subtitle documents
pub struct ChunkedTranslator<T: ChunkTranslator> {
    /// The translator receiving each chunk
    translator: T,

    /// Per-run settings
    options: TranslationOptions,
}

impl<T: ChunkTranslator> ChunkedTranslator<T> {
    /// Create a new chunked translator
    pub fn new(translator: T, options: TranslationOptions) -> Self {
        Self { translator, options }
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    /// Split a document into chunks of at most `chunk_size` cue blocks.
    ///
    /// VTT header and metadata blocks are left out so that every chunk holds
    /// only cues.
    pub fn build_chunks(&self, text: &str, format: SubtitleFormat) -> Vec<String> {
        let chunk_size = self.options.chunk_size.max(1);

        let blocks: Vec<&str> = split_into_blocks(text)
            .into_iter()
            .filter(|block| format != SubtitleFormat::Vtt || !is_vtt_metadata_block(block))
            .collect();

        blocks.chunks(chunk_size).map(|chunk| chunk.join("\n\n")).collect()
    }

    /// Translate a whole document.
    ///
    /// Returns `Completed` with the final text, `Cancelled` with whatever was
    /// assembled before the stop, or the first chunk failure. Nothing of a
    /// failed run is returned.
    pub async fn translate_document<F>(
        &self,
        text: &str,
        format: SubtitleFormat,
        cancel: &CancelHandle,
        progress_callback: F,
    ) -> Result<TranslationOutcome, TranslationError>
    where
        F: Fn(usize, usize),
    {
        let chunks = self.build_chunks(text, format);
        let total_chunks = chunks.len();
        let mut accumulated = String::new();

        debug!(
            "Translating {} chunk(s) of up to {} cues into '{}'",
            total_chunks, self.options.chunk_size, self.options.target_language
        );

        for (index, chunk) in chunks.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!("Translation cancelled after {} of {} chunks", index, total_chunks);
                return Ok(TranslationOutcome::Cancelled {
                    partial: accumulated.trim().to_string(),
                    completed_chunks: index,
                    total_chunks,
                });
            }

            debug!("Translating chunk {} of {}", index + 1, total_chunks);

            let payload = match format {
                SubtitleFormat::Vtt => prepare_vtt_chunk(chunk),
                SubtitleFormat::Srt => chunk.clone(),
            };

            let translated = self
                .translator
                .translate_chunk(&payload)
                .await
                .map_err(|source| TranslationError::ChunkFailed {
                    chunk: index + 1,
                    total: total_chunks,
                    source,
                })?;

            let sent = split_into_blocks(&payload).len();
            let received = split_into_blocks(&translated).len();
            if sent != received {
                warn!(
                    "Chunk {} of {}: sent {} cues but received {}; timings may not line up",
                    index + 1,
                    total_chunks,
                    sent,
                    received
                );
            }

            if !translated.is_empty() {
                accumulated.push_str(&translated);
                accumulated.push_str("\n\n");
            }

            progress_callback(index + 1, total_chunks);
        }

        let mut output = fix_numbers(accumulated.trim());
        if format == SubtitleFormat::Vtt {
            output = internal_srt_to_vtt(&output);
        }

        Ok(TranslationOutcome::Completed(output))
    }
}

/// Flatten a chunk of VTT cues into internal SRT, or pass it through as-is
/// when it cannot be parsed on its own.
fn prepare_vtt_chunk(chunk: &str) -> String {
    let mini_document = format!("{}\n\n{}", VTT_HEADER, chunk);
    match vtt_to_internal_srt(&mini_document) {
        Ok(internal) => internal,
        Err(e) => {
            warn!("Could not parse VTT chunk, sending as is: {}", e);
            chunk.to_string()
        }
    }
}
