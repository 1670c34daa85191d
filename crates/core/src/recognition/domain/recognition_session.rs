use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::recognition_accumulator::{CompletionSignal, RecognitionAccumulator, WaitOutcome};
use super::recognition_engine::{
    EngineError, RecognitionEngine, RecognitionListener, RecognizerConfig,
};
use super::recognition_event::{CancellationReason, RecognitionEvent, ResultReason};
use crate::language::domain::language_normalizer::normalize;
use crate::shared::constants::{NO_SPEECH_PLACEHOLDER, RECOGNITION_TIMEOUT, TARGET_LANGUAGE};
use crate::shared::transcription::Transcript;
use crate::shared::transcription_error::TranscriptionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long to wait for the recognizer to finish on its own.
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: RECOGNITION_TIMEOUT,
        }
    }
}

/// Runs one bounded recognition over a local audio file.
///
/// Recognition is started, the session blocks until the recognizer reports
/// a terminal state or the timeout passes, and the recognizer is then stopped.
/// Reaching the timeout is not an error: whatever was collected so far is
/// used.
pub struct RecognitionSession<'a> {
    engine: &'a dyn RecognitionEngine,
    config: SessionConfig,
}

impl<'a> RecognitionSession<'a> {
    pub fn new(engine: &'a dyn RecognitionEngine, config: SessionConfig) -> Self {
        Self { engine, config }
    }

    /// Transcribes without translating. `translated_text` mirrors
    /// `original_text`.
    pub fn transcribe(
        &self,
        audio: &Path,
        language: &str,
    ) -> Result<Transcript, TranscriptionError> {
        let (accumulator, signal) = RecognitionAccumulator::new();
        let listener = Arc::new(TranscriptionListener {
            accumulator: accumulator.clone(),
        });

        let config = RecognizerConfig::transcription(language);
        self.run(&config, audio, listener, &signal)
            .map_err(|e| unexpected("Transcription", e))?;

        let text = accumulator.snapshot().original_text();
        if text.is_empty() {
            return Err(TranscriptionError::NoSpeechDetected);
        }

        Ok(Transcript {
            original_text: text.clone(),
            translated_text: text,
            detected_language: language.to_string(),
        })
    }

    /// Transcribes in the source language and translates to English.
    ///
    /// `source_language` is normalized first; `None` selects the default.
    pub fn translate(
        &self,
        audio: &Path,
        source_language: Option<&str>,
    ) -> Result<Transcript, TranscriptionError> {
        let resolved = normalize(source_language);
        let (accumulator, signal) = RecognitionAccumulator::new();
        let listener = Arc::new(TranslationListener {
            accumulator: accumulator.clone(),
            target_language: TARGET_LANGUAGE.to_string(),
        });

        let config = RecognizerConfig::translation(&resolved.canonical, TARGET_LANGUAGE);
        let outcome = self.run(&config, audio, listener, &signal);

        // A recorded cancellation error takes precedence over a failed stop.
        let fragments = accumulator.snapshot();
        if let Some(details) = fragments.error {
            return Err(TranscriptionError::TranslationFailure(details));
        }
        outcome.map_err(|e| unexpected("Translation", e))?;

        let original = fragments.original_text();
        let translated = fragments.translated_text();
        if original.is_empty() && translated.is_empty() {
            return Err(TranscriptionError::NoSpeechDetected);
        }

        let translated_text = if !translated.is_empty() {
            translated
        } else {
            original.clone()
        };
        let original_text = if original.is_empty() {
            NO_SPEECH_PLACEHOLDER.to_string()
        } else {
            original
        };

        Ok(Transcript {
            original_text,
            translated_text,
            detected_language: resolved.canonical,
        })
    }

    fn run(
        &self,
        config: &RecognizerConfig,
        audio: &Path,
        listener: Arc<dyn RecognitionListener>,
        signal: &CompletionSignal,
    ) -> Result<(), EngineError> {
        log::debug!(
            "Starting recognition ({:?}, {}) for {}",
            config.mode,
            config.source_language,
            audio.display()
        );
        let mut recognition = self.engine.start(config, audio, listener)?;

        if signal.wait_timeout(self.config.timeout) == WaitOutcome::TimedOut {
            log::warn!(
                "Recognition did not finish within {:?}; using partial result",
                self.config.timeout
            );
        }

        recognition.stop()
    }
}

fn unexpected(operation: &str, error: EngineError) -> TranscriptionError {
    TranscriptionError::UnexpectedFault(format!("{operation} failed: {error}"))
}

struct TranscriptionListener {
    accumulator: Arc<RecognitionAccumulator>,
}

impl RecognitionListener for TranscriptionListener {
    fn on_event(&self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Recognized {
                reason: ResultReason::RecognizedSpeech,
                text,
                ..
            } => self.accumulator.push_original(text),
            RecognitionEvent::Recognized { .. } => {}
            RecognitionEvent::SessionStopped => self.accumulator.complete(),
            RecognitionEvent::Canceled { error_details, .. } => {
                if !error_details.is_empty() {
                    log::debug!("Transcription canceled: {error_details}");
                }
                self.accumulator.complete();
            }
        }
    }
}

struct TranslationListener {
    accumulator: Arc<RecognitionAccumulator>,
    target_language: String,
}

impl RecognitionListener for TranslationListener {
    fn on_event(&self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Recognized {
                reason: ResultReason::TranslatedSpeech,
                text,
                mut translations,
            } => {
                self.accumulator.push_original(text);
                if let Some(translated) = translations.remove(&self.target_language) {
                    self.accumulator.push_translated(translated);
                }
            }
            RecognitionEvent::Recognized { .. } => {}
            RecognitionEvent::SessionStopped => self.accumulator.complete(),
            RecognitionEvent::Canceled {
                reason: CancellationReason::Error,
                error_details,
            } => self.accumulator.fail(error_details),
            RecognitionEvent::Canceled { .. } => self.accumulator.complete(),
        }
    }
}
