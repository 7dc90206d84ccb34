/*!
 * Dictionary lookups.
 *
 * Two sources share the `DictionarySource` trait: a small bundled English
 * dictionary that works offline, and a client for the free
 * dictionaryapi.dev service. Both return entries in the same shape.
 */

use std::collections::HashMap;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{DictionaryError, ProviderError};

/// Public dictionaryapi.dev endpoint for English entries
pub const DEFAULT_ENDPOINT: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

static BUNDLED_ENTRIES: Lazy<HashMap<String, DictionaryEntry>> = Lazy::new(|| {
    let entries: Vec<DictionaryEntry> =
        serde_json::from_str(include_str!("../data/dictionary.json"))
            .expect("bundled dictionary is valid JSON");
    entries
        .into_iter()
        .map(|entry| (entry.word.to_lowercase(), entry))
        .collect()
});

/// Pronunciation of a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Phonetic {
    /// IPA transcription
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Link to an audio recording
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// One sense of a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// Definitions grouped by part of speech
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

/// A dictionary entry in the dictionaryapi.dev format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

/// A place to look words up
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Look up a single word
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, DictionaryError>;
}

/// Trim and lowercase a search term, rejecting blank input
pub fn normalize_query(word: &str) -> Result<String, DictionaryError> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(DictionaryError::EmptyQuery);
    }
    Ok(word)
}

/// Offline dictionary with a handful of bundled English words
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalDictionary;

impl LocalDictionary {
    /// Search the bundled entries
    pub fn search(&self, word: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let word = normalize_query(word)?;
        BUNDLED_ENTRIES
            .get(&word)
            .map(|entry| vec![entry.clone()])
            .ok_or(DictionaryError::NotFound(word))
    }

    /// Words available offline, sorted
    pub fn words(&self) -> Vec<&'static str> {
        let mut words: Vec<&'static str> = BUNDLED_ENTRIES.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

#[async_trait]
impl DictionarySource for LocalDictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        self.search(word)
    }
}

/// Client for dictionaryapi.dev
#[derive(Debug)]
pub struct FreeDictionary {
    client: Client,
    endpoint: String,
}

impl FreeDictionary {
    /// Create a new client; an empty endpoint selects the public API
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
        }
    }

    /// URL for a word, with the word as an encoded path segment
    pub fn entry_url(&self, word: &str) -> Result<Url, DictionaryError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::RequestFailed("Endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

#[async_trait]
impl DictionarySource for FreeDictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let word = normalize_query(word)?;
        let url = self.entry_url(&word)?;
        debug!("Looking up '{}' at {}", word, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ProviderError::from)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DictionaryError::NotFound(word));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Dictionary API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            }
            .into());
        }

        let entries = response
            .json::<Vec<DictionaryEntry>>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
        if entries.is_empty() {
            return Err(DictionaryError::NotFound(word));
        }
        Ok(entries)
    }
}
