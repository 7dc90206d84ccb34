use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::translation::PipelineOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO), or `auto`
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Grammar checking config
    #[serde(default)]
    pub grammar: GrammarConfig,

    /// Dictionary config
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation backend type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationBackend {
    // @backend: MyMemory remote API, chunked
    #[default]
    MyMemory,
    // @backend: Bundled word tables, offline
    Static,
}

impl TranslationBackend {
    // @returns: Capitalized backend name
    pub fn display_name(&self) -> &str {
        match self {
            Self::MyMemory => "MyMemory",
            Self::Static => "Static tables",
        }
    }

    // @returns: Lowercase backend identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::MyMemory => "mymemory".to_string(),
            Self::Static => "static".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mymemory" => Ok(Self::MyMemory),
            "static" => Ok(Self::Static),
            _ => Err(anyhow!("Invalid translation backend: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Backend to translate with
    #[serde(default)]
    pub backend: TranslationBackend,

    /// Service endpoint URL; empty selects the public MyMemory API
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Contact email sent to MyMemory for a larger daily quota
    #[serde(default = "String::new")]
    pub email: String,

    /// Maximum characters per request
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Delay in milliseconds between consecutive chunk requests
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,

    /// Timeout for a single chunk request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            backend: TranslationBackend::default(),
            endpoint: String::new(),
            email: String::new(),
            max_chunk_chars: default_max_chunk_chars(),
            chunk_delay_ms: default_chunk_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Pipeline tunables derived from this config
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_chunk_chars: self.max_chunk_chars,
            chunk_delay: Duration::from_millis(self.chunk_delay_ms),
            request_timeout: self.timeout(),
        }
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Grammar checking configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GrammarConfig {
    /// LanguageTool endpoint; empty selects the public API
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Language used when none is given on the command line
    #[serde(default = "default_grammar_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            language: default_grammar_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where dictionary lookups go
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryBackend {
    /// Bundled offline entries
    #[default]
    Local,
    /// dictionaryapi.dev
    Remote,
}

/// Dictionary configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DictionaryConfig {
    /// Default lookup backend
    #[serde(default)]
    pub backend: DictionaryBackend,

    /// Remote endpoint; empty selects dictionaryapi.dev
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            backend: DictionaryBackend::default(),
            endpoint: String::new(),
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
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_chunk_chars() -> usize {
    500 // MyMemory rejects longer queries
}

fn default_chunk_delay_ms() -> u64 {
    300
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_grammar_language() -> String {
    "en-US".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_source_code(&self.source_language)
            .context("Invalid source language")?;
        crate::language_utils::validate_language_code(&self.target_language)
            .context("Invalid target language")?;

        if self.translation.max_chunk_chars == 0 {
            return Err(anyhow!("translation.max_chunk_chars must be greater than zero"));
        }

        for (name, secs) in [
            ("translation", self.translation.timeout_secs),
            ("grammar", self.grammar.timeout_secs),
            ("dictionary", self.dictionary.timeout_secs),
        ] {
            if secs == 0 {
                return Err(anyhow!("{}.timeout_secs must be greater than zero", name));
            }
        }

        Ok(())
    }

    /// Load the configuration file, or write and return the defaults when
    /// it does not exist yet
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            translation: TranslationConfig::default(),
            grammar: GrammarConfig::default(),
            dictionary: DictionaryConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
