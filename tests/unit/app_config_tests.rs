/*!
 * Tests for application configuration
 */

use anyhow::Result;
use subglot::app_config::{Config, LogLevel, TranslationProvider};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_shouldUseJapaneseToEnglishDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "ja");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.translation.provider, TranslationProvider::Gemini);
    assert_eq!(config.translation.model, "gemini-3-pro-preview");
    assert_eq!(config.translation.batch_size, 25);
    assert_eq!(config.translation.timeout_secs, 120);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test save/load round trip through a file
#[test]
fn test_saveAndLoad_withCustomValues_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_language = "fr".to_string();
    config.translation.batch_size = 10;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.target_language, "fr");
    assert_eq!(loaded.translation.batch_size, 10);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that partial config files pick up defaults for missing fields
#[test]
fn test_fromFile_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"translation": {"api_key": "k"}}"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.source_language, "ja");
    assert_eq!(config.translation.api_key, "k");
    assert_eq!(config.translation.batch_size, 25);
    Ok(())
}

/// Test that malformed JSON is rejected with an error
#[test]
fn test_fromFile_withMalformedJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "not json at all")?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Test validation of a well-formed configuration
#[test]
fn test_validate_withApiKey_shouldPass() {
    let mut config = Config::default();
    config.translation.api_key = "test-key".to_string();

    assert!(config.validate().is_ok());
}

/// Test validation failure cases
#[test]
fn test_validate_withInvalidFields_shouldFail() {
    let mut config = Config::default();
    config.translation.api_key = "test-key".to_string();

    config.translation.batch_size = 0;
    assert!(config.validate().is_err());

    config.translation.batch_size = 25;
    config.translation.model = String::new();
    assert!(config.validate().is_err());

    config.translation.model = "gemini-3-pro-preview".to_string();
    config.translation.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());

    config.translation.endpoint = "http://localhost:8080".to_string();
    assert!(config.validate().is_ok());

    config.source_language = String::new();
    assert!(config.validate().is_err());
}

/// Test provider parsing from strings
#[test]
fn test_providerFromStr_withKnownAndUnknownNames_shouldParseAccordingly() {
    assert_eq!("gemini".parse::<TranslationProvider>().unwrap(), TranslationProvider::Gemini);
    assert_eq!("Gemini".parse::<TranslationProvider>().unwrap(), TranslationProvider::Gemini);
    assert!("openai".parse::<TranslationProvider>().is_err());
}

/// Test the configured key wins over the environment fallback
#[test]
fn test_apiKey_withConfiguredValue_shouldIgnoreEnvironment() {
    let mut config = Config::default();
    config.translation.api_key = "configured".to_string();
    assert_eq!(config.translation.api_key(), "configured");
}
