use anyhow::{anyhow, Result};
use futures::StreamExt;
use log::{info, warn};
use std::sync::Arc;

use crate::app_config::{Config, DictionaryBackend, TranslationBackend};
use crate::dictionary::{DictionaryEntry, DictionarySource, FreeDictionary, LocalDictionary};
use crate::errors::SpeechError;
use crate::grammar::{GrammarChecker, GrammarIssue};
use crate::language_utils;
use crate::providers::mymemory::MyMemory;
use crate::providers::TranslationProvider;
use crate::speech::{RecognitionEvent, SpeechService, UnsupportedSpeech};
use crate::translation::{
    ChunkResult, ChunkedTranslationPipeline, StaticTableTranslator, TranslationOutcome,
    TranslationRequest,
};

// @module: Application controller wiring configuration to services

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Injected speech capability
    speech: Arc<dyn SpeechService>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            speech: Arc::new(UnsupportedSpeech),
        })
    }

    /// Replace the speech capability
    pub fn with_speech(mut self, speech: Arc<dyn SpeechService>) -> Self {
        self.speech = speech;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate with the configured backend
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome> {
        self.translate_using(self.config.translation.backend, text, source_language, target_language)
            .await
    }

    /// Translate with an explicit backend
    pub async fn translate_using(
        &self,
        backend: TranslationBackend,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome> {
        match backend {
            TranslationBackend::MyMemory => {
                let translation = &self.config.translation;
                let provider = MyMemory::new(translation.endpoint.clone(), translation.timeout())
                    .with_email(translation.email.clone());
                self.translate_with_provider(provider, text, source_language, target_language)
                    .await
            }
            TranslationBackend::Static => {
                ensure_text(text)?;
                let translated = StaticTableTranslator::new().translate(
                    text,
                    source_language,
                    target_language,
                )?;
                Ok(TranslationOutcome {
                    chunks: vec![ChunkResult {
                        order: 0,
                        translated_text: translated.clone(),
                        succeeded: true,
                    }],
                    text: translated,
                })
            }
        }
    }

    /// Translate through the chunked pipeline with any provider
    pub async fn translate_with_provider<P: TranslationProvider>(
        &self,
        provider: P,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome> {
        ensure_text(text)?;

        let mut options = self.config.translation.pipeline_options();
        options.max_chunk_chars = options.max_chunk_chars.min(provider.max_request_chars());

        let pipeline = ChunkedTranslationPipeline::with_options(provider, options);
        let request = TranslationRequest::new(text, source_language, target_language);
        let outcome = pipeline.translate_detailed(&request).await?;

        if outcome.is_complete() {
            info!("Translated {} chunk(s)", outcome.chunks.len());
        } else {
            warn!(
                "{} of {} chunk(s) could not be translated and were kept as is",
                outcome.fallback_count(),
                outcome.chunks.len()
            );
        }
        Ok(outcome)
    }

    /// Check grammar, defaulting to the configured language
    pub async fn check_grammar(&self, text: &str, language: Option<&str>) -> Result<Vec<GrammarIssue>> {
        let grammar = &self.config.grammar;
        let language = language.unwrap_or(grammar.language.as_str());
        let checker = GrammarChecker::new(
            grammar.endpoint.clone(),
            std::time::Duration::from_secs(grammar.timeout_secs),
        );
        Ok(checker.check(text, language).await?)
    }

    /// Look up a word in the configured dictionary, or the remote one when asked
    pub async fn define(&self, word: &str, force_remote: bool) -> Result<Vec<DictionaryEntry>> {
        let dictionary = &self.config.dictionary;
        let source: Box<dyn DictionarySource> =
            if force_remote || dictionary.backend == DictionaryBackend::Remote {
                Box::new(FreeDictionary::new(
                    dictionary.endpoint.clone(),
                    std::time::Duration::from_secs(dictionary.timeout_secs),
                ))
            } else {
                Box::new(LocalDictionary)
            };
        Ok(source.lookup(word).await?)
    }

    /// Read text aloud; a host without speech support only gets a warning
    pub async fn speak(&self, text: &str, language: &str) -> Result<()> {
        let language = if language_utils::is_auto(language) {
            self.config.target_language.as_str()
        } else {
            language
        };
        match self.speech.speak(text, language).await {
            Err(SpeechError::Unsupported(what)) => {
                warn!("{} is not available on this host", what);
                Ok(())
            }
            other => Ok(other?),
        }
    }

    /// Listen in `language` and return the first transcript heard
    pub async fn listen(&self, language: &str) -> Result<String> {
        let mut events = self.speech.recognize(language).await?;
        while let Some(event) = events.next().await {
            match event {
                RecognitionEvent::Transcript(text) if !text.trim().is_empty() => {
                    info!("Heard {} chars", text.chars().count());
                    return Ok(text);
                }
                RecognitionEvent::Transcript(_) => continue,
                RecognitionEvent::Error(message) => {
                    return Err(SpeechError::Engine(message).into());
                }
            }
        }
        Err(anyhow!("No speech was recognized"))
    }
}

/// Blank input is rejected before any request is made
fn ensure_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(anyhow!("Please enter text to translate"));
    }
    Ok(())
}
