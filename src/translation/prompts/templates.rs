/*!
 * Prompt templates for subtitle translation.
 *
 * The whole chunk travels as one opaque instruction text: the rules first,
 * then the SRT-like cues to translate.
 */

use crate::language_utils;

/// Instruction template for translating SRT-like cue blocks.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default instruction for subtitle translation.
    /// Placeholders: {target_language}, {tone}
    pub const SUBTITLE_TRANSLATOR: &'static str = r#"Translate the following subtitles, currently in an SRT-like format, into {target_language}.
Maintain the original SRT formatting meticulously: sequence numbers, timestamps (e.g., "00:00:20,123 --> 00:00:22,456"), and all line breaks must be preserved exactly as in the original.
Apply a {tone} tone to the translated dialogue portions only.
Ensure that any numbers appearing within the dialogue (e.g., "10 dollars", "Chapter 5"), which are NOT part of the SRT timestamps, are also appropriately translated or localized for the {target_language} language.
Do NOT add any extra explanations, comments, or any text whatsoever beyond the translated subtitle content itself. The output must be only the translated SRT."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default subtitle translator template.
    pub fn subtitle_translator() -> Self {
        Self::new(Self::SUBTITLE_TRANSLATOR)
    }

    /// Render the template with the given variables.
    pub fn render(&self, target_language: &str, tone: &str) -> String {
        self.template
            .replace("{target_language}", target_language)
            .replace("{tone}", tone)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::subtitle_translator()
    }
}

/// Builder for the per-chunk translation prompt.
#[derive(Debug, Clone)]
pub struct TranslationPromptBuilder {
    template: PromptTemplate,
    target_language: String,
    tone: String,
}

impl TranslationPromptBuilder {
    /// Create a builder for a target language code and tone label.
    pub fn new(target_language: &str, tone: &str) -> Self {
        Self {
            template: PromptTemplate::default(),
            target_language: language_utils::prompt_language_label(target_language),
            tone: tone.trim().to_string(),
        }
    }

    /// Use a custom instruction template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Build the full prompt for one chunk of internal SRT text.
    pub fn build(&self, chunk_text: &str) -> String {
        let tone = if self.tone.is_empty() { "Neutral" } else { self.tone.as_str() };

        format!(
            "{}\n\nOriginal Subtitles:\n{}",
            self.template.render(&self.target_language, tone),
            chunk_text.trim()
        )
    }
}
