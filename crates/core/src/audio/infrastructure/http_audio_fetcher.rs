use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::audio::domain::audio_fetcher::{AudioFetcher, FetchError};
use crate::audio::domain::local_audio::LocalAudio;
use crate::shared::constants::{AUDIO_FILE_SUFFIX, DOWNLOAD_TIMEOUT};

/// Fetches audio over HTTP into a temporary `.wav` file.
///
/// One GET per acquisition, bounded by a fixed timeout and never retried.
pub struct HttpAudioFetcher {
    client: reqwest::blocking::Client,
    temp_dir: Option<PathBuf>,
}

impl HttpAudioFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            temp_dir: None,
        })
    }

    /// Place downloaded files in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }
}

impl AudioFetcher for HttpAudioFetcher {
    fn acquire(&self, url: &str) -> Result<LocalAudio, FetchError> {
        let download_error = |source| FetchError::Download {
            url: url.to_string(),
            source,
        };

        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(download_error)?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("promptscribe-").suffix(AUDIO_FILE_SUFFIX);
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(FetchError::TempFile)?;

        // A failed write drops `file`, which removes the partial download.
        let path = file.path().to_path_buf();
        file.write_all(&bytes)
            .map_err(|e| FetchError::Write {
                path: path.clone(),
                source: e,
            })?;
        file.flush().map_err(|e| FetchError::Write { path, source: e })?;

        log::debug!("Downloaded {} bytes from {url}", bytes.len());
        Ok(LocalAudio::from_temp_path(file.into_temp_path()))
    }
}
