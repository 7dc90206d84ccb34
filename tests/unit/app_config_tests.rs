/*!
 * Tests for application configuration functionality
 */

use std::str::FromStr;
use std::time::Duration;

use linguaflow::app_config::{Config, DictionaryBackend, LogLevel, TranslationBackend};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "es");
    assert_eq!(config.translation.backend, TranslationBackend::MyMemory);
    assert_eq!(config.translation.max_chunk_chars, 500);
    assert_eq!(config.translation.chunk_delay_ms, 300);
    assert_eq!(config.translation.timeout_secs, 30);
    assert_eq!(config.grammar.language, "en-US");
    assert_eq!(config.dictionary.backend, DictionaryBackend::Local);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_pipelineOptions_shouldMirrorTranslationConfig() {
    let mut config = Config::default();
    config.translation.chunk_delay_ms = 50;
    config.translation.timeout_secs = 7;

    let options = config.translation.pipeline_options();
    assert_eq!(options.max_chunk_chars, 500);
    assert_eq!(options.chunk_delay, Duration::from_millis(50));
    assert_eq!(options.request_timeout, Duration::from_secs(7));
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Auto-detection is a valid source but not a valid target
    config.source_language = "auto".to_string();
    assert!(config.validate().is_ok());
    config.target_language = "auto".to_string();
    assert!(config.validate().is_err());
    config.target_language = "hi".to_string();
    assert!(config.validate().is_ok());

    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "en".to_string();

    config.translation.max_chunk_chars = 0;
    assert!(config.validate().is_err());
    config.translation.max_chunk_chars = 500;

    config.grammar.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_translationBackend_fromStr_shouldParseCaseInsensitively() {
    assert_eq!(TranslationBackend::from_str("MyMemory").unwrap(), TranslationBackend::MyMemory);
    assert_eq!(TranslationBackend::from_str("static").unwrap(), TranslationBackend::Static);
    assert!(TranslationBackend::from_str("google").is_err());
    assert_eq!(TranslationBackend::Static.to_string(), "static");
}

#[test]
fn test_logLevel_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.target_language, "es");
    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(reloaded.translation.max_chunk_chars, config.translation.max_chunk_chars);
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "source_language": "fr",
            "target_language": "de",
            "translation": { "backend": "static", "chunk_delay_ms": 0 },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.source_language, "fr");
    assert_eq!(config.translation.backend, TranslationBackend::Static);
    assert_eq!(config.translation.chunk_delay_ms, 0);
    assert_eq!(config.translation.max_chunk_chars, 500);
    assert_eq!(config.grammar.language, "en-US");
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json").unwrap();

    let error = Config::load_or_create(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
}
