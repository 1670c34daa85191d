use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::recognition_event::RecognitionEvent;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to read audio {path}: {source}")]
    Audio {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start recognition: {0}")]
    Start(String),
    #[error("failed to stop recognition: {0}")]
    Stop(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionMode {
    Transcribe,
    Translate { target_language: String },
}

/// How a recognizer should be set up for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognizerConfig {
    /// Canonical code such as `de-DE`.
    pub source_language: String,
    pub mode: RecognitionMode,
}

impl RecognizerConfig {
    pub fn transcription(source_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            mode: RecognitionMode::Transcribe,
        }
    }

    pub fn translation(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            mode: RecognitionMode::Translate {
                target_language: target_language.into(),
            },
        }
    }
}

/// Receives events from a running recognizer.
///
/// Engines may call this from any thread, including several at once.
pub trait RecognitionListener: Send + Sync {
    fn on_event(&self, event: RecognitionEvent);
}

/// A continuous recognition that has been started and not yet stopped.
pub trait ActiveRecognition: Send {
    /// Stops recognition. Events arriving afterwards may be dropped.
    fn stop(&mut self) -> Result<(), EngineError>;
}

/// Domain interface for a streaming speech recognizer.
///
/// `start` returns as soon as recognition is running; results are delivered
/// to `listener` asynchronously until a terminal event or `stop`.
pub trait RecognitionEngine: Send + Sync {
    fn start(
        &self,
        config: &RecognizerConfig,
        audio: &Path,
        listener: Arc<dyn RecognitionListener>,
    ) -> Result<Box<dyn ActiveRecognition>, EngineError>;
}
