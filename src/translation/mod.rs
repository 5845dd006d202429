/*!
 * Translation pipeline for subtitle documents.
 *
 * This module contains the functionality for translating subtitle text with
 * a text-generation provider. It is split into several submodules:
 *
 * - `core`: Translation service and per-run options
 * - `batch`: Sequential chunking, cancellation and reassembly
 * - `formatting`: Numeral normalization of translated output
 * - `prompts`: Prompt templates and builders for translation
 */

// Re-export main types for easier usage
pub use self::batch::{CancelHandle, ChunkTranslator, ChunkedTranslator, TranslationOutcome};
pub use self::core::{TranslationOptions, TranslationService};
pub use self::formatting::fix_numbers;

// Re-export prompt types
pub use self::prompts::{PromptTemplate, TranslationPromptBuilder};

// Submodules
pub mod batch;
pub mod core;
pub mod formatting;
pub mod prompts;
