/*!
 * Grammar checking through the LanguageTool HTTP API.
 */

use std::time::Duration;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{GrammarError, ProviderError};

/// Public LanguageTool check endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.languagetool.org/v2/check";

/// Language used when the caller has no preference
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Replacement suggestions kept per issue
const MAX_REPLACEMENTS: usize = 3;

/// A grammar or spelling problem found in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    /// Explanation of the problem
    pub message: String,
    /// Start of the problem, in UTF-16 code units
    pub offset: usize,
    /// Length of the problem, in UTF-16 code units
    pub length: usize,
    /// Suggested replacements, best first
    pub replacements: Vec<String>,
    /// Excerpt of the text around the problem
    pub context: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<CheckMatch>,
}

#[derive(Debug, Deserialize)]
struct CheckMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
    context: MatchContext,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct MatchContext {
    text: String,
}

impl From<CheckMatch> for GrammarIssue {
    fn from(m: CheckMatch) -> Self {
        Self {
            message: m.message,
            offset: m.offset,
            length: m.length,
            replacements: m
                .replacements
                .into_iter()
                .take(MAX_REPLACEMENTS)
                .map(|r| r.value)
                .collect(),
            context: m.context.text,
        }
    }
}

/// Parse a raw LanguageTool response body
pub fn parse_check_response(body: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
    let response: CheckResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(e.to_string()))?;
    Ok(response.matches.into_iter().map(GrammarIssue::from).collect())
}

/// Byte index of the character starting at UTF-16 position `units`.
///
/// A position inside a surrogate pair moves to the next character; a
/// position past the end maps to the end of the text.
fn utf16_to_byte_index(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (index, c) in text.char_indices() {
        if seen >= units {
            return index;
        }
        seen += c.len_utf16();
    }
    text.len()
}

/// Replace the text covered by `issue` with `replacement`.
///
/// LanguageTool reports offsets as UTF-16 code units, so they are mapped
/// back onto the string before slicing. A range running past the end of the
/// text is clamped to the end.
pub fn apply_correction(text: &str, issue: &GrammarIssue, replacement: &str) -> String {
    let start = utf16_to_byte_index(text, issue.offset);
    let end = utf16_to_byte_index(text, issue.offset.saturating_add(issue.length)).max(start);

    let mut corrected = String::with_capacity(text.len() + replacement.len());
    corrected.push_str(&text[..start]);
    corrected.push_str(replacement);
    corrected.push_str(&text[end..]);
    corrected
}

/// Apply the first suggestion of every issue that has one.
///
/// Issues are applied right to left so earlier offsets stay valid.
pub fn apply_first_suggestions(text: &str, issues: &[GrammarIssue]) -> String {
    let mut ordered: Vec<&GrammarIssue> = issues.iter().collect();
    ordered.sort_by_key(|issue| std::cmp::Reverse(issue.offset));

    ordered.into_iter().fold(text.to_string(), |corrected, issue| {
        match issue.replacements.first() {
            Some(replacement) => apply_correction(&corrected, issue, replacement),
            None => corrected,
        }
    })
}

/// LanguageTool client
#[derive(Debug)]
pub struct GrammarChecker {
    client: Client,
    endpoint: String,
}

impl GrammarChecker {
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

    /// Check `text` written in `language` (e.g. `en-US`, `fr`, or `auto`)
    pub async fn check(&self, text: &str, language: &str) -> Result<Vec<GrammarIssue>, GrammarError> {
        if text.trim().is_empty() {
            return Err(GrammarError::EmptyText);
        }
        let language = if language.trim().is_empty() {
            DEFAULT_LANGUAGE
        } else {
            language.trim()
        };

        debug!("Checking {} chars of {} text", text.chars().count(), language);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("text", text), ("language", language)])
            .send()
            .await
            .map_err(ProviderError::from)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("LanguageTool API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            }
            .into());
        }

        let body = response.text().await.map_err(ProviderError::from)?;
        parse_check_response(&body)
    }
}
