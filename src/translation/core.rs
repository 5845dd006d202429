/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct, which turns one
 * chunk of internal SRT text into a translated chunk by building a prompt and
 * sending it to the configured provider.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error};

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::providers::gemini::{Gemini, GeminiRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::Provider;

use super::batch::ChunkTranslator;
use super::prompts::TranslationPromptBuilder;

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// Google Gemini generateContent
    Gemini {
        /// Client instance
        client: Gemini,
    },

    /// Offline provider
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

/// Per-run settings, fixed for the duration of one translation
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOptions {
    /// Target language code (ISO)
    pub target_language: String,

    /// Tone label for the prompt
    pub tone: String,

    /// Sampling temperature, 0.0 to 1.0
    pub temperature: f32,

    /// Maximum number of cues per request
    pub chunk_size: usize,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            tone: "Neutral".to_string(),
            temperature: 0.7,
            chunk_size: 50,
        }
    }
}

/// Main translation service for subtitle translation
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Translation options
    pub options: TranslationOptions,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig, options: TranslationOptions) -> Result<Self> {
        let provider = match config.provider {
            ConfigTranslationProvider::Gemini => {
                if config.api_key.trim().is_empty() {
                    return Err(anyhow!("API Key and Subtitle Text are required."));
                }
                TranslationProviderImpl::Gemini {
                    client: Gemini::new(config.api_key.clone(), config.endpoint.clone(), config.timeout_secs),
                }
            }
            ConfigTranslationProvider::Mock => TranslationProviderImpl::Mock {
                client: MockProvider::working(),
            },
        };

        Ok(Self {
            provider,
            config,
            options,
        })
    }

    /// Create a service backed by a specific mock provider
    pub fn with_mock(client: MockProvider, options: TranslationOptions) -> Self {
        Self {
            provider: TranslationProviderImpl::Mock { client },
            config: TranslationConfig {
                provider: ConfigTranslationProvider::Mock,
                ..TranslationConfig::default()
            },
            options,
        }
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        debug!(
            "Testing connection to {} with model {}",
            self.config.provider.display_name(),
            self.config.model
        );

        let result = match &self.provider {
            TranslationProviderImpl::Gemini { client } => client.test_connection().await,
            TranslationProviderImpl::Mock { client } => client.test_connection().await,
        };

        if let Err(e) = &result {
            error!("{} connection check failed: {}", self.config.provider.display_name(), e);
        }
        result
    }

    /// Translate one chunk of internal SRT text
    pub async fn translate_text(&self, text: &str) -> Result<String, ProviderError> {
        let prompt = TranslationPromptBuilder::new(&self.options.target_language, &self.options.tone).build(text);

        let result = match &self.provider {
            TranslationProviderImpl::Gemini { client } => {
                let request = GeminiRequest::new(self.config.model.clone(), prompt, self.options.temperature);
                client.complete(request).await.map(|response| Gemini::extract_text(&response))
            }
            TranslationProviderImpl::Mock { client } => {
                let request = MockRequest {
                    text: text.to_string(),
                    prompt,
                    target_language: self.options.target_language.clone(),
                };
                client.complete(request).await.map(|response| MockProvider::extract_text(&response))
            }
        };

        match result {
            Ok(translated) if translated.trim().is_empty() => Err(ProviderError::EmptyResponse),
            Ok(translated) => Ok(translated.trim().to_string()),
            Err(e) => {
                error!("{} request failed: {}", self.config.provider.display_name(), e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ChunkTranslator for TranslationService {
    async fn translate_chunk(&self, text: &str) -> Result<String, ProviderError> {
        self.translate_text(text).await
    }

    async fn check_connection(&self) -> Result<(), ProviderError> {
        self.test_connection().await
    }
}
