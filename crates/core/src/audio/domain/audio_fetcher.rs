use std::path::PathBuf;

use thiserror::Error;

use super::local_audio::LocalAudio;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to create temporary audio file: {0}")]
    TempFile(#[source] std::io::Error),
    #[error("failed to write audio to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for bringing remote audio onto the local filesystem.
pub trait AudioFetcher: Send + Sync {
    /// Downloads `url` into a new local file owned by the returned handle.
    ///
    /// No file is left behind when this returns an error.
    fn acquire(&self, url: &str) -> Result<LocalAudio, FetchError>;
}
