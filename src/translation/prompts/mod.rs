/*!
 * Prompt construction for subtitle translation.
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptTemplate, TranslationPromptBuilder};
