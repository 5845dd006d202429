use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::translation::core::TranslationOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Tone label applied to translated dialogue
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Input size (characters) above which a warning is logged
    #[serde(default = "default_char_count_warning_threshold")]
    pub char_count_warning_threshold: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Gemini generateContent
    #[default]
    Gemini,
    // @provider: Offline echo provider
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini => "Gemini",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the provider
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Base endpoint URL, up to and including `/models`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of cues sent in one request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            chunk_size: default_chunk_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_tone() -> String {
    "Neutral".to_string()
}

fn default_char_count_warning_threshold() -> usize {
    15_000
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_chunk_size() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    300
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.target_language.trim().is_empty() {
            return Err(anyhow!("Target language is required"));
        }
        crate::language_utils::validate_language_code(&self.target_language)?;

        let translation = &self.translation;
        if !(0.0..=1.0).contains(&translation.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 1.0, got {}",
                translation.temperature
            ));
        }

        if translation.chunk_size == 0 {
            return Err(anyhow!("Chunk size must be at least 1 cue"));
        }

        if translation.provider == TranslationProvider::Gemini {
            Url::parse(&translation.endpoint)
                .with_context(|| format!("Invalid endpoint URL: {}", translation.endpoint))?;

            if translation.model.trim().is_empty() {
                return Err(anyhow!("Model name is required for the Gemini provider"));
            }

            if translation.api_key.trim().is_empty() {
                return Err(anyhow!(
                    "No API key configured for the Gemini provider (set GEMINI_API_KEY or --api-key)"
                ));
            }
        }

        Ok(())
    }

    /// Immutable per-run settings handed to the translation pipeline
    pub fn translation_options(&self) -> TranslationOptions {
        TranslationOptions {
            target_language: self.target_language.clone(),
            tone: self.tone.clone(),
            temperature: self.translation.temperature,
            chunk_size: self.translation.chunk_size,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            tone: default_tone(),
            translation: TranslationConfig::default(),
            char_count_warning_threshold: default_char_count_warning_threshold(),
            log_level: LogLevel::default(),
        }
    }
}
