/*!
 * Tests for the error taxonomy and user-facing messages
 */

use submovies::errors::{AppError, ProviderError, SubtitleError, TranslationError, GENERIC_ERROR_MESSAGE};

#[test]
fn test_subtitleError_display_shouldMatchUserStrings() {
    assert_eq!(
        SubtitleError::MissingHeader.to_string(),
        "Invalid VTT content: Missing WEBVTT header."
    );
    assert_eq!(
        SubtitleError::Validation("Invalid SRT content. Check format.".to_string()).to_string(),
        "Validation error: Invalid SRT content. Check format."
    );
}

#[test]
fn test_contentBlocked_display_shouldIncludeReasonAndDetails() {
    let err = ProviderError::ContentBlocked {
        reason: "SAFETY".to_string(),
        details: "HARM_CATEGORY_HARASSMENT: HIGH".to_string(),
    };

    assert_eq!(
        err.to_string(),
        "Prompt blocked by API: SAFETY. Details: HARM_CATEGORY_HARASSMENT: HIGH"
    );
}

#[test]
fn test_chunkFailed_shouldExposeProviderError() {
    let err = TranslationError::ChunkFailed {
        chunk: 2,
        total: 3,
        source: ProviderError::EmptyResponse,
    };

    assert!(err.to_string().starts_with("Chunk 2 of 3 failed"));
    assert!(matches!(err.provider_error(), Some(ProviderError::EmptyResponse)));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_userMessage_withCollaboratorError_shouldPrefixApiError() {
    let err: AppError = TranslationError::ChunkFailed {
        chunk: 1,
        total: 1,
        source: ProviderError::ApiError {
            status_code: 400,
            message: "API key not valid.".to_string(),
        },
    }
    .into();

    assert_eq!(
        err.user_message(),
        "API Error: API responded with error: 400 - API key not valid."
    );
}

#[test]
fn test_userMessage_withValidationError_shouldUseDisplayText() {
    let err: AppError = SubtitleError::Validation("Subtitle text is empty".to_string()).into();
    assert_eq!(err.user_message(), "Validation error: Subtitle text is empty");
}

#[test]
fn test_userMessage_withEmptyMessage_shouldFallBackToGeneric() {
    let err = AppError::Unknown("  ".to_string());
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

#[test]
fn test_fromAnyhow_shouldKeepMessage() {
    let err: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(err, AppError::Unknown(ref msg) if msg == "boom"));
}
