use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::{Client, StatusCode};
use log::{error, debug};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Longest slice of a non-JSON error body carried into the error message
const MAX_RAW_ERROR_CHARS: usize = 500;

/// Gemini client for the generateContent endpoint
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL up to and including `/models`
    endpoint: String,
}

impl std::fmt::Debug for Gemini {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gemini")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// generateContent request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// The model to use; part of the URL, not the body
    #[serde(skip)]
    pub model: String,

    /// Conversation contents
    pub contents: Vec<GeminiContent>,

    /// Sampling parameters
    pub generation_config: GenerationConfig,
}

/// One content entry with its parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Text parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Part text
    #[serde(default)]
    pub text: Option<String>,
}

/// Generation parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Creativity, 0.0 to 1.0
    pub temperature: f32,
}

/// generateContent response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    /// Feedback about the prompt, present when it was blocked
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One generated candidate
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

/// Prompt feedback block
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked
    #[serde(default)]
    pub block_reason: Option<String>,

    /// Safety ratings for the prompt
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

/// Safety rating entry
#[derive(Debug, Clone, Deserialize)]
pub struct SafetyRating {
    /// Harm category
    pub category: String,
    /// Probability bucket
    pub probability: String,
}

impl GeminiRequest {
    /// Create a single-prompt request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: Some(prompt.into()) }],
            }],
            generation_config: GenerationConfig { temperature },
        }
    }
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if any
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    fn api_url(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.endpoint.trim_end_matches('/'), model)
    }

    /// Turn a raw HTTP status and body into a checked response.
    ///
    /// Non-success statuses, blocked prompts and answers without text all
    /// become errors.
    pub fn parse_response(status: StatusCode, body: &str) -> Result<GeminiResponse, ProviderError> {
        if !status.is_success() {
            let message = Self::error_message(status, body);
            error!("Gemini API error ({}): {}", status, message);
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(ProviderError::AuthenticationError(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let response: GeminiResponse = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.clone())
        {
            let ratings = response
                .prompt_feedback
                .as_ref()
                .map(|feedback| {
                    feedback
                        .safety_ratings
                        .iter()
                        .map(|r| format!("{}: {}", r.category, r.probability))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            let details = if ratings.is_empty() {
                "No further details.".to_string()
            } else {
                ratings
            };
            return Err(ProviderError::ContentBlocked { reason, details });
        }

        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(response),
            _ => {
                error!("No content in Gemini response structure");
                Err(ProviderError::EmptyResponse)
            }
        }
    }

    /// Error message for a failed request: the API's own message when the
    /// body is JSON, otherwise the status line plus the start of the body.
    fn error_message(status: StatusCode, body: &str) -> String {
        let fallback = format!(
            "API request failed: {} {}.",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        );

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => {
                let error = json.get("error");
                let mut message = error
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or(fallback);
                if let Some(details) = error.and_then(|e| e.get("details")) {
                    message.push_str(&format!(" Details: {}", details));
                }
                message
            }
            Err(_) if !body.trim().is_empty() => {
                let snippet: String = body.chars().take(MAX_RAW_ERROR_CHARS).collect();
                format!("{} Response: {}", fallback, snippet)
            }
            Err(_) => fallback,
        }
    }
}

#[async_trait]
impl Provider for Gemini {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        debug!(
            "Sending to Gemini API. Model: {}, Temp: {}",
            request.model, request.generation_config.temperature
        );

        let response = self
            .client
            .post(self.api_url(&request.model))
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        Self::parse_response(status, &body)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = self.endpoint.trim_end_matches('/').to_string();
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: Self::error_message(status, &body),
            })
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.first_text().unwrap_or_default().to_string()
    }
}
