use thiserror::Error;

/// Every way a transcription run can fail.
///
/// The display text is what ends up in `TranscriptionResult::error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("Azure Speech credentials are not configured.")]
    UnconfiguredCredentials,
    #[error("Failed to download audio file")]
    DownloadFailure,
    #[error("No speech detected in audio")]
    NoSpeechDetected,
    #[error("Translation canceled: {0}")]
    TranslationFailure(String),
    #[error("{0}")]
    UnexpectedFault(String),
}
