/*!
 * Tests for application configuration
 */

use anyhow::Result;
use submovies::app_config::{Config, LogLevel, TranslationConfig, TranslationProvider};
use crate::common;

fn gemini_config() -> Config {
    Config {
        translation: TranslationConfig {
            api_key: "test-key".to_string(),
            ..TranslationConfig::default()
        },
        ..Config::default()
    }
}

#[test]
fn test_default_config_shouldCarryDocumentedDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "en");
    assert_eq!(config.tone, "Neutral");
    assert_eq!(config.char_count_warning_threshold, 15_000);
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.translation.provider, TranslationProvider::Gemini);
    assert_eq!(config.translation.model, "gemini-1.5-flash-latest");
    assert_eq!(config.translation.temperature, 0.7);
    assert_eq!(config.translation.chunk_size, 50);
    assert!(config.translation.endpoint.ends_with("/v1beta/models"));
}

#[test]
fn test_validate_withApiKey_shouldPass() {
    assert!(gemini_config().validate().is_ok());
}

#[test]
fn test_validate_withoutApiKeyForGemini_shouldFail() {
    let err = Config::default().validate().unwrap_err();
    assert!(err.to_string().contains("API key"));
}

#[test]
fn test_validate_withMockProvider_shouldNotRequireKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withOutOfRangeValues_shouldFail() {
    let mut config = gemini_config();
    config.translation.temperature = 1.5;
    assert!(config.validate().is_err());

    let mut config = gemini_config();
    config.translation.chunk_size = 0;
    assert!(config.validate().is_err());

    let mut config = gemini_config();
    config.target_language = "zz".to_string();
    assert!(config.validate().is_err());

    let mut config = gemini_config();
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_translationOptions_shouldMirrorConfig() {
    let mut config = gemini_config();
    config.target_language = "fa".to_string();
    config.tone = "Formal".to_string();
    config.translation.chunk_size = 10;

    let options = config.translation_options();

    assert_eq!(options.target_language, "fa");
    assert_eq!(options.tone, "Formal");
    assert_eq!(options.chunk_size, 10);
    assert_eq!(options.temperature, 0.7);
}

#[test]
fn test_saveAndLoad_shouldRoundTrip() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");
    let mut config = gemini_config();
    config.target_language = "fa".to_string();
    config.log_level = LogLevel::Debug;

    config.save(&path)?;
    let loaded = Config::from_file(&path)?;

    assert_eq!(loaded.target_language, "fa");
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert_eq!(loaded.translation.api_key, "test-key");
    Ok(())
}

#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{"target_language":"fa","translation":{"provider":"mock","chunk_size":5}}"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.target_language, "fa");
    assert_eq!(config.tone, "Neutral");
    assert_eq!(config.translation.provider, TranslationProvider::Mock);
    assert_eq!(config.translation.chunk_size, 5);
    assert_eq!(config.translation.model, "gemini-1.5-flash-latest");
    Ok(())
}

#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ nope")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

#[test]
fn test_translationProvider_parsing_shouldBeCaseInsensitive() {
    assert_eq!("Gemini".parse::<TranslationProvider>().unwrap(), TranslationProvider::Gemini);
    assert_eq!("MOCK".parse::<TranslationProvider>().unwrap(), TranslationProvider::Mock);
    assert!("openai".parse::<TranslationProvider>().is_err());
    assert_eq!(TranslationProvider::Gemini.to_string(), "gemini");
}
