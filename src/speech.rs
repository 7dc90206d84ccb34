/*!
 * Speech synthesis and recognition as an injectable capability.
 *
 * Callers receive a `SpeechService` instead of reaching for a platform
 * global, so hosts without speech support and tests can plug in their own
 * implementation.
 */

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::errors::SpeechError;

/// Default speaking rate, slightly slower than normal for clarity
pub const DEFAULT_RATE: f32 = 0.9;

/// Default voice pitch
pub const DEFAULT_PITCH: f32 = 1.0;

/// Something to be spoken
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    /// Utterance with default rate and pitch
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            rate: DEFAULT_RATE,
            pitch: DEFAULT_PITCH,
        }
    }
}

/// Event produced while listening
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Final transcript of what was heard
    Transcript(String),
    /// The recognizer reported a problem
    Error(String),
}

/// Speech synthesis and recognition
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Speak `text` in `language`
    async fn speak(&self, text: &str, language: &str) -> Result<(), SpeechError>;

    /// Stop any ongoing speech
    async fn stop(&self) -> Result<(), SpeechError>;

    /// Listen in `language`.
    ///
    /// The stream is finite and ends when the recognizer stops; it cannot
    /// be restarted, call `recognize` again instead.
    async fn recognize(
        &self,
        language: &str,
    ) -> Result<BoxStream<'static, RecognitionEvent>, SpeechError>;
}

/// Speech service for hosts without any speech support
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSpeech;

#[async_trait]
impl SpeechService for UnsupportedSpeech {
    async fn speak(&self, _text: &str, _language: &str) -> Result<(), SpeechError> {
        Err(SpeechError::Unsupported("Text-to-speech"))
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        // Nothing can be playing
        Ok(())
    }

    async fn recognize(
        &self,
        _language: &str,
    ) -> Result<BoxStream<'static, RecognitionEvent>, SpeechError> {
        Err(SpeechError::Unsupported("Speech recognition"))
    }
}

/// Speech service that replays a fixed script and records what it was
/// asked to say
#[derive(Debug, Default)]
pub struct ScriptedSpeech {
    transcripts: Vec<Result<String, String>>,
    spoken: Mutex<Vec<Utterance>>,
    speaking: AtomicBool,
}

impl ScriptedSpeech {
    /// Recognizer that will hear each transcript in turn
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transcripts: transcripts.into_iter().map(|t| Ok(t.into())).collect(),
            ..Self::default()
        }
    }

    /// Append a recognizer error to the script
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.transcripts.push(Err(message.into()));
        self
    }

    /// Everything spoken so far
    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken
            .lock()
            .map(|spoken| spoken.clone())
            .unwrap_or_default()
    }

    /// Whether an utterance is in progress
    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechService for ScriptedSpeech {
    async fn speak(&self, text: &str, language: &str) -> Result<(), SpeechError> {
        let utterance = Utterance::new(text, language);
        info!("Speaking {} chars in {}", text.chars().count(), language);
        self.spoken
            .lock()
            .map_err(|e| SpeechError::Engine(e.to_string()))?
            .push(utterance);
        self.speaking.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        self.speaking.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn recognize(
        &self,
        language: &str,
    ) -> Result<BoxStream<'static, RecognitionEvent>, SpeechError> {
        debug!("Listening in {}", language);
        let events = self
            .transcripts
            .iter()
            .cloned()
            .map(|t| match t {
                Ok(text) => RecognitionEvent::Transcript(text),
                Err(message) => RecognitionEvent::Error(message),
            })
            .collect::<Vec<_>>();
        Ok(stream::iter(events).boxed())
    }
}
