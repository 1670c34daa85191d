use std::fmt;

use super::constants::{SPEECH_KEY_ENV, SPEECH_REGION_ENV};

/// Speech service settings as supplied by the hosting environment.
///
/// Either value may be missing; [`SpeechSettings::credentials`] only yields
/// credentials when both are present and non-blank.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SpeechSettings {
    pub key: Option<String>,
    pub region: Option<String>,
}

/// A complete key/region pair for the speech service.
#[derive(Clone, PartialEq, Eq)]
pub struct SpeechCredentials {
    pub key: String,
    pub region: String,
}

impl SpeechSettings {
    /// Reads `AZURE_SPEECH_KEY` and `AZURE_SPEECH_REGION`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            key: lookup(SPEECH_KEY_ENV),
            region: lookup(SPEECH_REGION_ENV),
        }
    }

    pub fn credentials(&self) -> Option<SpeechCredentials> {
        let key = non_blank(self.key.as_deref())?;
        let region = non_blank(self.region.as_deref())?;
        Some(SpeechCredentials {
            key: key.to_string(),
            region: region.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Keys never end up in logs.
impl fmt::Debug for SpeechSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechSettings")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .finish()
    }
}

impl fmt::Debug for SpeechCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechCredentials")
            .field("key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}
