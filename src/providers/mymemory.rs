use std::time::Duration;
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::TranslationProvider;

/// Public MyMemory endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// MyMemory rejects queries longer than this
pub const MAX_QUERY_CHARS: usize = 500;

/// Prefix MyMemory puts in `translatedText` once the daily quota is used up
const QUOTA_WARNING_PREFIX: &str = "MYMEMORY WARNING";

/// MyMemory client for the free translation memory API
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// API endpoint URL
    endpoint: String,
    /// Contact email; raises the anonymous daily quota when present
    email: Option<String>,
}

/// Payload part of a MyMemory response
#[derive(Debug, Deserialize)]
pub struct MyMemoryResponseData {
    /// The translated text
    #[serde(rename = "translatedText", default)]
    pub translated_text: Option<String>,
}

/// MyMemory response envelope
#[derive(Debug, Deserialize)]
pub struct MyMemoryResponse {
    /// Translation payload
    #[serde(rename = "responseData", default)]
    pub response_data: Option<MyMemoryResponseData>,

    /// Status code; sent as a number or as a numeric string
    #[serde(rename = "responseStatus", default)]
    pub response_status: Option<Value>,

    /// Human readable details, usually set on errors
    #[serde(rename = "responseDetails", default)]
    pub response_details: Option<String>,

    /// Set once the caller has used up the daily quota
    #[serde(rename = "quotaFinished", default)]
    pub quota_finished: Option<bool>,
}

impl MyMemoryResponse {
    /// Numeric response status, whichever form it was sent in
    pub fn status(&self) -> Option<u16> {
        match self.response_status.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Turn the envelope into translated text or a provider error
    pub fn into_translation(self) -> Result<String, ProviderError> {
        let status = self.status();
        let details = self.response_details.clone().unwrap_or_default();

        if status == Some(403) || self.quota_finished == Some(true) {
            return Err(ProviderError::QuotaExceeded(if details.is_empty() {
                "Translation API limit reached. Please try again later.".to_string()
            } else {
                details
            }));
        }

        let text = self
            .response_data
            .and_then(|data| data.translated_text)
            .filter(|text| !text.trim().is_empty());

        match text {
            Some(text) if text.starts_with(QUOTA_WARNING_PREFIX) => {
                Err(ProviderError::QuotaExceeded(text))
            }
            Some(text) => Ok(text),
            None => match status {
                Some(code) if code != 200 => Err(ProviderError::ApiError {
                    status_code: code,
                    message: details,
                }),
                _ => Err(ProviderError::ParseError(
                    "Response has no translated text".to_string(),
                )),
            },
        }
    }
}

/// Parse a raw MyMemory response body
pub fn parse_response(body: &str) -> Result<String, ProviderError> {
    let response: MyMemoryResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(e.to_string()))?;
    response.into_translation()
}

/// Build the `langpair` query value, mapping `auto` to MyMemory's detector
pub fn lang_pair(source_language: &str, target_language: &str) -> String {
    let source = if language_utils::is_auto(source_language) {
        "autodetect".to_string()
    } else {
        source_language.trim().to_string()
    };
    format!("{}|{}", source, target_language.trim())
}

impl MyMemory {
    /// Create a new MyMemory client
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
            email: None,
        }
    }

    /// Attach a contact email sent with every request
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = if email.trim().is_empty() { None } else { Some(email) };
        self
    }

    /// Endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query parameters for one request
    pub fn query_params(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", text.to_string()),
            ("langpair", lang_pair(source_language, target_language)),
        ];
        if let Some(email) = &self.email {
            params.push(("de", email.clone()));
        }
        params
    }
}

#[async_trait]
impl TranslationProvider for MyMemory {
    fn name(&self) -> &str {
        "MyMemory"
    }

    fn max_request_chars(&self) -> usize {
        MAX_QUERY_CHARS
    }

    fn supports_pair(&self, source_language: &str, target_language: &str) -> bool {
        if language_utils::validate_language_code(target_language).is_err() {
            return false;
        }
        if language_utils::is_auto(source_language) {
            return true;
        }
        language_utils::validate_language_code(source_language).is_ok()
            && !language_utils::language_codes_match(source_language, target_language)
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let params = self.query_params(text, source_language, target_language);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("MyMemory API error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                429 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError {
                    status_code: code,
                    message: error_text,
                },
            });
        }

        let body = response.text().await?;
        debug!("MyMemory response: {}", body);
        parse_response(&body)
    }
}
