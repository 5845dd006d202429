/*!
 * Provider implementations for the translation collaborator.
 *
 * This module contains client implementations for text-generation backends:
 * - Gemini: Google generative language API (generateContent)
 * - Mock: offline provider for dry runs and tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// An `Ok` response is guaranteed to carry non-empty text; blocked and
    /// empty answers are reported as errors.
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod gemini;
pub mod mock;
