/*!
 * Error types for the submovies application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Fallback notification shown when an error carries no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "Translation failed. Please try again.";

/// Errors that can occur when talking to the translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The prompt was rejected by the provider's safety filter
    #[error("Prompt blocked by API: {reason}. Details: {details}")]
    ContentBlocked {
        /// Block reason reported by the provider
        reason: String,
        /// Rendered safety ratings
        details: String,
    },

    /// The provider answered without any text
    #[error("No translation content received in API response structure.")]
    EmptyResponse,
}

/// Errors that can occur while validating or converting subtitle text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// Input is not a recognizable SRT or VTT document
    #[error("Validation error: {0}")]
    Validation(String),

    /// VTT text without the leading WEBVTT header line
    #[error("Invalid VTT content: Missing WEBVTT header.")]
    MissingHeader,

    /// Structurally unusable subtitle text
    #[error("Conversion error: {0}")]
    Unparseable(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error with subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// A chunk failed and the remaining chunks were abandoned
    #[error("Chunk {chunk} of {total} failed: {source}")]
    ChunkFailed {
        /// 1-based index of the failing chunk
        chunk: usize,
        /// Total number of chunks in the run
        total: usize,
        /// Underlying collaborator error
        #[source]
        source: ProviderError,
    },
}

impl TranslationError {
    /// The collaborator error behind this failure, if any
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(e) | Self::ChunkFailed { source: e, .. } => Some(e),
            Self::Subtitle(_) => None,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Single user-facing notification for this error.
    ///
    /// Collaborator failures surface the provider's own message; everything
    /// else uses its display text, falling back to a generic message.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Provider(e) => format!("API Error: {}", e),
            Self::Translation(e) => match e.provider_error() {
                Some(provider) => format!("API Error: {}", provider),
                None => e.to_string(),
            },
            Self::Subtitle(e) => e.to_string(),
            Self::File(msg) | Self::Unknown(msg) => msg.clone(),
        };

        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
