use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::audio::domain::audio_fetcher::AudioFetcher;
use crate::language::domain::language_normalizer::is_english;
use crate::pipeline::pipeline_logger::{NullPipelineLogger, PipelineLogger};
use crate::recognition::domain::recognition_engine::RecognitionEngine;
use crate::recognition::domain::recognition_session::{RecognitionSession, SessionConfig};
use crate::shared::transcription::{Transcript, TranscriptionRequest, TranscriptionResult};
use crate::shared::transcription_error::TranscriptionError;

/// Downloads a recording, transcribes it and, unless it is English,
/// translates it to English.
///
/// `run` never panics and never returns an error: every failure ends up in
/// the returned [`TranscriptionResult`]. The downloaded file is removed before
/// `run` returns on every path.
pub struct TranscribeAudioUseCase {
    fetcher: Box<dyn AudioFetcher>,
    engine: Option<Box<dyn RecognitionEngine>>,
    session_config: SessionConfig,
}

impl TranscribeAudioUseCase {
    /// `engine` is `None` when no speech service credentials are configured;
    /// every run then fails without touching the network or filesystem.
    pub fn new(fetcher: Box<dyn AudioFetcher>, engine: Option<Box<dyn RecognitionEngine>>) -> Self {
        Self {
            fetcher,
            engine,
            session_config: SessionConfig::default(),
        }
    }

    pub fn with_session_config(mut self, session_config: SessionConfig) -> Self {
        self.session_config = session_config;
        self
    }

    pub fn run(&self, request: &TranscriptionRequest) -> TranscriptionResult {
        self.run_logged(request, &mut NullPipelineLogger)
    }

    pub fn run_logged(
        &self,
        request: &TranscriptionRequest,
        logger: &mut dyn PipelineLogger,
    ) -> TranscriptionResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute(request, logger)))
            .unwrap_or_else(|payload| {
                Err(TranscriptionError::UnexpectedFault(panic_message(
                    payload.as_ref(),
                )))
            });

        match outcome {
            Ok(transcript) => {
                logger.info(&format!(
                    "Transcribed {} ({})",
                    request.audio_url, transcript.detected_language
                ));
                TranscriptionResult::succeeded(transcript)
            }
            Err(e) => {
                logger.warn(&format!("Transcription of {} failed: {e}", request.audio_url));
                TranscriptionResult::failed(e.to_string())
            }
        }
    }

    fn execute(
        &self,
        request: &TranscriptionRequest,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Transcript, TranscriptionError> {
        let engine = self
            .engine
            .as_deref()
            .ok_or(TranscriptionError::UnconfiguredCredentials)?;

        let started = Instant::now();
        let audio = self.fetcher.acquire(&request.audio_url).map_err(|e| {
            logger.warn(&format!("Error downloading audio: {e}"));
            TranscriptionError::DownloadFailure
        })?;
        logger.timing("download", elapsed_ms(started));

        let started = Instant::now();
        let session = RecognitionSession::new(engine, self.session_config);
        let source_language = request.source_language.as_deref();
        let result = if is_english(source_language) {
            session
                .transcribe(audio.path(), source_language.unwrap_or_default())
                .map(|transcript| Transcript {
                    translated_text: transcript.original_text.clone(),
                    ..transcript
                })
        } else {
            session.translate(audio.path(), source_language)
        };
        logger.timing("recognition", elapsed_ms(started));

        audio.release();
        result
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "recognition aborted unexpectedly".to_string()
    }
}
