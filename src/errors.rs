/*!
 * Error types for the linguaflow library.
 *
 * Each service area gets its own error enum, defined with the thiserror crate.
 * `AppError` wraps them all for callers that handle every area at once.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
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

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The provider's usage quota is exhausted; no further request can succeed
    #[error("Translation quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The request did not complete within the configured time
    #[error("Request timed out after {0} ms")]
    Timeout(u64),
}

impl ProviderError {
    /// Whether this error ends the whole translation instead of a single chunk
    pub fn is_quota(&self) -> bool {
        matches!(self, Self::QuotaExceeded(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(0)
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors surfaced to callers of a translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No provider or table can handle the requested language pair
    #[error("Unsupported language pair: {source_lang} -> {target_lang}")]
    UnsupportedLanguagePair {
        /// Requested source language
        source_lang: String,
        /// Requested target language
        target_lang: String,
    },

    /// The translation could not produce any result
    #[error("Failed to translate text: {0}")]
    TranslationFailed(String),
}

/// Errors from the grammar checking service
#[derive(Error, Debug)]
pub enum GrammarError {
    /// Nothing to check
    #[error("Text to check is empty")]
    EmptyText,

    /// The grammar service could not be reached or answered badly
    #[error("Grammar service error: {0}")]
    Service(#[from] ProviderError),
}

/// Errors from dictionary lookups
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The search term was empty or whitespace
    #[error("Please enter a word to search")]
    EmptyQuery,

    /// No entry exists for the word
    #[error("Word not found in dictionary: {0}")]
    NotFound(String),

    /// The remote dictionary failed
    #[error("Dictionary service error: {0}")]
    Service(#[from] ProviderError),
}

/// Errors from a speech capability
#[derive(Error, Debug)]
pub enum SpeechError {
    /// The host has no speech support for this operation
    #[error("{0} not supported")]
    Unsupported(&'static str),

    /// The speech engine reported an error
    #[error("Speech engine error: {0}")]
    Engine(String),
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

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from grammar checking
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),

    /// Error from a dictionary lookup
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// Error from speech
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
