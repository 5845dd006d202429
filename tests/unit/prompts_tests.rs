/*!
 * Tests for translation prompt construction
 */

use submovies::translation::prompts::{PromptTemplate, TranslationPromptBuilder};

const CHUNK: &str = "1\n00:00:01,000 --> 00:00:02,000\nHello";

#[test]
fn test_build_shouldCarryLanguageToneAndChunk() {
    let prompt = TranslationPromptBuilder::new("fa", "Formal").build(CHUNK);

    assert!(prompt.contains("into Persian (fa)"));
    assert!(prompt.contains("Apply a Formal tone"));
    assert!(prompt.ends_with(&format!("Original Subtitles:\n{}", CHUNK)));
}

#[test]
fn test_build_withBlankTone_shouldDefaultToNeutral() {
    let prompt = TranslationPromptBuilder::new("en", "  ").build(CHUNK);
    assert!(prompt.contains("Apply a Neutral tone"));
}

#[test]
fn test_withTemplate_shouldReplaceInstructions() {
    let prompt = TranslationPromptBuilder::new("de", "Casual")
        .with_template(PromptTemplate::new("To {target_language}, {tone}."))
        .build(CHUNK);

    assert_eq!(prompt, format!("To German (de), Casual.\n\nOriginal Subtitles:\n{}", CHUNK));
}

#[test]
fn test_defaultTemplate_shouldHaveNoUnfilledPlaceholders() {
    let rendered = PromptTemplate::default().render("Persian (fa)", "Neutral");
    assert!(!rendered.contains('{'));
}
