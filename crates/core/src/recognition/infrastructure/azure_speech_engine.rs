use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use thiserror::Error;

use super::azure_messages::{RecognitionResponse, TranslateItem, TranslateResult};
use crate::recognition::domain::recognition_engine::{
    ActiveRecognition, EngineError, RecognitionEngine, RecognitionListener, RecognitionMode,
    RecognizerConfig,
};
use crate::recognition::domain::recognition_event::RecognitionEvent;
use crate::shared::constants::RECOGNITION_TIMEOUT;
use crate::shared::speech_settings::SpeechCredentials;

const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";
const TRANSLATOR_BASE_URL: &str = "https://api.cognitive.microsofttranslator.com";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";
const WAV_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";

#[derive(Error, Debug)]
enum ServiceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("recognition ended with status {0}")]
    Recognition(String),
}

/// Recognition engine backed by the Azure Speech and Translator REST APIs.
///
/// Each session runs on its own worker thread: the whole file is sent for
/// recognition, the text is optionally translated, and the results are
/// reported as `Recognized` followed by `SessionStopped`. Audio without
/// matched speech yields a `NoMatch` result, and an empty file is canceled
/// with `EndOfStream` before any request. Service failures are reported as a
/// `Canceled` event with an error reason.
///
/// The Translator request reuses the Speech key and region. That only works
/// with a multi-service Cognitive Services key; a key from a Speech-only
/// resource is rejected by the Translator API and translation sessions are
/// canceled with a 401.
pub struct AzureSpeechEngine {
    client: reqwest::blocking::Client,
    credentials: SpeechCredentials,
    speech_base_url: String,
    translator_base_url: String,
}

impl AzureSpeechEngine {
    pub fn new(credentials: SpeechCredentials) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(RECOGNITION_TIMEOUT)
            .build()?;
        let speech_base_url = format!("https://{}.stt.speech.microsoft.com", credentials.region);
        Ok(Self {
            client,
            credentials,
            speech_base_url,
            translator_base_url: TRANSLATOR_BASE_URL.to_string(),
        })
    }

    pub fn with_speech_base_url(mut self, url: impl Into<String>) -> Self {
        self.speech_base_url = url.into();
        self
    }

    pub fn with_translator_base_url(mut self, url: impl Into<String>) -> Self {
        self.translator_base_url = url.into();
        self
    }
}

impl RecognitionEngine for AzureSpeechEngine {
    fn start(
        &self,
        config: &RecognizerConfig,
        audio: &Path,
        listener: Arc<dyn RecognitionListener>,
    ) -> Result<Box<dyn ActiveRecognition>, EngineError> {
        let audio_bytes = std::fs::read(audio).map_err(|e| EngineError::Audio {
            path: audio.to_path_buf(),
            source: e,
        })?;

        let job = RecognitionJob {
            client: self.client.clone(),
            credentials: self.credentials.clone(),
            speech_url: format!(
                "{}{RECOGNITION_PATH}",
                self.speech_base_url.trim_end_matches('/')
            ),
            translate_url: format!(
                "{}/translate",
                self.translator_base_url.trim_end_matches('/')
            ),
            config: config.clone(),
            audio_bytes,
        };

        let stopped = Arc::new(AtomicBool::new(false));
        let flag = stopped.clone();
        let worker = thread::Builder::new()
            .name("azure-recognition".to_string())
            .spawn(move || job.run(listener.as_ref(), &flag))
            .map_err(|e| EngineError::Start(e.to_string()))?;

        Ok(Box::new(AzureRecognition {
            stopped,
            worker: Some(worker),
        }))
    }
}

struct AzureRecognition {
    stopped: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl ActiveRecognition for AzureRecognition {
    /// Reports a worker that died mid-session. A worker still waiting on the
    /// service is detached; it drops its events once it sees the flag.
    fn stop(&mut self) -> Result<(), EngineError> {
        self.stopped.store(true, Ordering::SeqCst);
        match self.worker.take() {
            Some(worker) if worker.is_finished() => worker
                .join()
                .map_err(|_| EngineError::Stop("recognition worker panicked".to_string())),
            _ => Ok(()),
        }
    }
}

struct RecognitionJob {
    client: reqwest::blocking::Client,
    credentials: SpeechCredentials,
    speech_url: String,
    translate_url: String,
    config: RecognizerConfig,
    audio_bytes: Vec<u8>,
}

impl RecognitionJob {
    fn run(self, listener: &dyn RecognitionListener, stopped: &AtomicBool) {
        let emit = |event: RecognitionEvent| {
            if stopped.load(Ordering::SeqCst) {
                log::debug!("Dropping event after stop: {event:?}");
            } else {
                listener.on_event(event);
            }
        };

        if self.audio_bytes.is_empty() {
            emit(RecognitionEvent::end_of_stream());
            return;
        }

        match self.session_events() {
            Ok(events) => {
                for event in events {
                    emit(event);
                }
                emit(RecognitionEvent::SessionStopped);
            }
            Err(e) => {
                log::warn!("Azure recognition failed: {e}");
                emit(RecognitionEvent::canceled_with_error(e.to_string()));
            }
        }
    }

    fn session_events(&self) -> Result<Vec<RecognitionEvent>, ServiceError> {
        let text = match self.recognize()? {
            Some(text) => text,
            None => return Ok(vec![RecognitionEvent::no_match()]),
        };

        let event = match &self.config.mode {
            RecognitionMode::Transcribe => RecognitionEvent::recognized(text),
            RecognitionMode::Translate { target_language } => {
                let translations: Vec<(String, String)> = self
                    .translate(&text, target_language)?
                    .map(|t| (target_language.clone(), t))
                    .into_iter()
                    .collect();
                RecognitionEvent::translated(text, translations)
            }
        };
        Ok(vec![event])
    }

    fn recognize(&self) -> Result<Option<String>, ServiceError> {
        let url = &self.speech_url;
        let response = self
            .client
            .post(url)
            .query(&[
                ("language", self.config.source_language.as_str()),
                ("format", "simple"),
            ])
            .header(KEY_HEADER, &self.credentials.key)
            .header(reqwest::header::CONTENT_TYPE, WAV_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(self.audio_bytes.clone())
            .send()
            .map_err(|e| request_error(url, e))?;

        let result: RecognitionResponse = check_status(url, response)?
            .json()
            .map_err(|e| request_error(url, e))?;

        if result.is_success() {
            log::debug!("Recognized {} chars", result.display_text.len());
            Ok(Some(result.display_text))
        } else if result.is_no_match() {
            log::debug!("No speech matched ({})", result.recognition_status);
            Ok(None)
        } else {
            Err(ServiceError::Recognition(result.recognition_status))
        }
    }

    fn translate(&self, text: &str, target_language: &str) -> Result<Option<String>, ServiceError> {
        let url = &self.translate_url;
        let source_base = self
            .config
            .source_language
            .split('-')
            .next()
            .unwrap_or_default();

        let response = self
            .client
            .post(url)
            .query(&[
                ("api-version", "3.0"),
                ("from", source_base),
                ("to", target_language),
            ])
            .header(KEY_HEADER, &self.credentials.key)
            .header(REGION_HEADER, &self.credentials.region)
            .json(&[TranslateItem { text }])
            .send()
            .map_err(|e| request_error(url, e))?;

        let results: Vec<TranslateResult> = check_status(url, response)?
            .json()
            .map_err(|e| request_error(url, e))?;

        Ok(results
            .into_iter()
            .flat_map(|r| r.translations)
            .find(|t| t.to.eq_ignore_ascii_case(target_language))
            .map(|t| t.text))
    }
}

fn request_error(url: &str, source: reqwest::Error) -> ServiceError {
    ServiceError::Request {
        url: url.to_string(),
        source,
    }
}

fn check_status(
    url: &str,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(ServiceError::Status {
        url: url.to_string(),
        status,
        body,
    })
}
