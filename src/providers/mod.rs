/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for remote translation backends:
 * - MyMemory: free translation memory API with a 500 character request limit
 * - Mock: scripted provider used by tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// A provider translates one size-bounded piece of text at a time. The
/// pipeline in `translation::pipeline` drives it chunk by chunk, so
/// implementations never need to split input themselves.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Human readable provider name used in logs
    fn name(&self) -> &str;

    /// Maximum number of characters accepted in a single request
    fn max_request_chars(&self) -> usize;

    /// Whether the provider can translate between the two languages
    ///
    /// Language codes are opaque to the pipeline; this is the only place
    /// where support is decided.
    fn supports_pair(&self, source_language: &str, target_language: &str) -> bool;

    /// Translate a single chunk of text
    ///
    /// # Arguments
    /// * `text` - The chunk to translate, at most `max_request_chars` long
    ///   unless a single sentence is longer
    /// * `source_language` - Source language code
    /// * `target_language` - Target language code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;
}

pub mod mock;
pub mod mymemory;
