/*!
 * Chunked translation pipeline.
 *
 * Translates text of any length through a provider that only accepts small
 * requests. The text is cut into sentence-aligned chunks, the chunks are
 * sent one at a time with a pause between requests, and the results are
 * joined back together in their original order.
 *
 * A chunk that fails for a local reason (network error, bad payload,
 * timeout) keeps its original text, so the caller receives a partial
 * translation instead of an error. Quota exhaustion is different: it ends
 * the whole call with `TranslationError::TranslationFailed`.
 */

use log::{debug, error, info, warn};
use std::time::{Duration, Instant};

use crate::errors::{ProviderError, TranslationError};
use crate::providers::TranslationProvider;
use super::chunking::{self, Chunk};

/// Default request size limit in characters
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 500;

/// Default pause between two consecutive chunk requests
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(300);

/// Default upper bound for a single chunk request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, or `auto`
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a new request
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Outcome of one chunk request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkResult {
    /// Position of the chunk in the source text
    pub order: usize,
    /// Translated text, or the original chunk text on fallback
    pub translated_text: String,
    /// Whether the provider translated the chunk
    pub succeeded: bool,
}

/// Full result of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// Final text, chunk results joined by a single space
    pub text: String,
    /// Per-chunk results in order
    pub chunks: Vec<ChunkResult>,
}

impl TranslationOutcome {
    /// Number of chunks that kept their original text
    pub fn fallback_count(&self) -> usize {
        self.chunks.iter().filter(|c| !c.succeeded).count()
    }

    /// Whether every chunk was translated by the provider
    pub fn is_complete(&self) -> bool {
        self.fallback_count() == 0
    }
}

/// Tunables for the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Maximum characters per chunk
    pub max_chunk_chars: usize,
    /// Pause between consecutive chunk requests
    pub chunk_delay: Duration,
    /// Time allowed for a single chunk request
    pub request_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            chunk_delay: DEFAULT_CHUNK_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Sequential chunk-by-chunk translator over a size-limited provider
#[derive(Debug, Clone)]
pub struct ChunkedTranslationPipeline<P: TranslationProvider> {
    provider: P,
    options: PipelineOptions,
}

impl<P: TranslationProvider> ChunkedTranslationPipeline<P> {
    /// Create a pipeline with default options
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, PipelineOptions::default())
    }

    /// Create a pipeline with explicit options
    pub fn with_options(provider: P, options: PipelineOptions) -> Self {
        Self { provider, options }
    }

    /// The provider behind this pipeline
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Active options
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Translate text and return the joined result
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let request = TranslationRequest::new(text, source_language, target_language);
        self.translate_detailed(&request).await.map(|outcome| outcome.text)
    }

    /// Translate text and return the per-chunk breakdown as well
    pub async fn translate_detailed(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, TranslationError> {
        if !self
            .provider
            .supports_pair(&request.source_language, &request.target_language)
        {
            return Err(TranslationError::UnsupportedLanguagePair {
                source_lang: request.source_language.clone(),
                target_lang: request.target_language.clone(),
            });
        }

        let chunks = chunking::split_into_chunks(&request.text, self.options.max_chunk_chars);
        if chunks.is_empty() {
            debug!("Nothing to translate, input is blank");
            return Ok(TranslationOutcome::default());
        }

        info!(
            "Translating {} chars in {} chunk(s) with {} ({} -> {})",
            request.text.chars().count(),
            chunks.len(),
            self.provider.name(),
            request.source_language,
            request.target_language
        );

        let start_time = Instant::now();
        let total = chunks.len();
        let mut results = Vec::with_capacity(total);

        for (index, chunk) in chunks.iter().enumerate() {
            let response = self.request_chunk(chunk, request).await;
            results.push(resolve_chunk(chunk, response)?);

            if index + 1 < total {
                tokio::time::sleep(self.options.chunk_delay).await;
            }
        }

        let outcome = assemble(results);
        debug!(
            "Translation finished in {:?}: {}/{} chunk(s) translated",
            start_time.elapsed(),
            total - outcome.fallback_count(),
            total
        );

        Ok(outcome)
    }

    /// Send one chunk, bounded by the request timeout
    async fn request_chunk(
        &self,
        chunk: &Chunk,
        request: &TranslationRequest,
    ) -> Result<String, ProviderError> {
        debug!("Sending chunk {} ({} chars)", chunk.order + 1, chunk.char_len());

        let timeout = self.options.request_timeout;
        tokio::time::timeout(
            timeout,
            self.provider.translate(
                &chunk.text,
                &request.source_language,
                &request.target_language,
            ),
        )
        .await
        .unwrap_or_else(|_| Err(ProviderError::Timeout(timeout.as_millis() as u64)))
    }
}

/// Reduce one provider response to a chunk result.
///
/// Quota exhaustion aborts the translation; every other failure, and an
/// empty payload, falls back to the original chunk text.
fn resolve_chunk(
    chunk: &Chunk,
    response: Result<String, ProviderError>,
) -> Result<ChunkResult, TranslationError> {
    match response {
        Ok(text) if !text.trim().is_empty() => Ok(ChunkResult {
            order: chunk.order,
            translated_text: text,
            succeeded: true,
        }),
        Err(e) if e.is_quota() => {
            error!("Translation quota exhausted at chunk {}: {}", chunk.order + 1, e);
            Err(TranslationError::TranslationFailed(e.to_string()))
        }
        other => {
            match other {
                Err(e) => warn!("Chunk {} failed, keeping original text: {}", chunk.order + 1, e),
                Ok(_) => warn!("Chunk {} came back empty, keeping original text", chunk.order + 1),
            }
            Ok(ChunkResult {
                order: chunk.order,
                translated_text: chunk.text.clone(),
                succeeded: false,
            })
        }
    }
}

/// Join chunk results in order
fn assemble(mut chunks: Vec<ChunkResult>) -> TranslationOutcome {
    chunks.sort_by_key(|c| c.order);
    let text = chunks
        .iter()
        .map(|c| c.translated_text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    TranslationOutcome { text, chunks }
}
