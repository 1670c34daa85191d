use serde::Serialize;

use super::constants::NO_TRANSLATION_PLACEHOLDER;

/// Input to one transcription run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub audio_url: String,
    /// Regional code such as `de-DE`, or any free-form string. `None` lets
    /// the normalizer pick the default source language.
    pub source_language: Option<String>,
}

impl TranscriptionRequest {
    pub fn new(audio_url: impl Into<String>, source_language: Option<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            source_language,
        }
    }
}

/// Text produced by a completed recognition session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    pub original_text: String,
    pub translated_text: String,
    pub detected_language: String,
}

/// Outcome of one transcription run.
///
/// `error` is set exactly when `success` is false, and a successful result
/// always carries a non-empty `translated_text`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TranscriptionResult {
    success: bool,
    original_text: String,
    translated_text: String,
    detected_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl TranscriptionResult {
    pub fn succeeded(transcript: Transcript) -> Self {
        let Transcript {
            original_text,
            translated_text,
            detected_language,
        } = transcript;
        let translated_text = if !translated_text.is_empty() {
            translated_text
        } else if !original_text.is_empty() {
            original_text.clone()
        } else {
            NO_TRANSLATION_PLACEHOLDER.to_string()
        };
        Self {
            success: true,
            original_text,
            translated_text,
            detected_language,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            original_text: String::new(),
            translated_text: String::new(),
            detected_language: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn detected_language(&self) -> &str {
        &self.detected_language
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(original: &str, translated: &str) -> Transcript {
        Transcript {
            original_text: original.to_string(),
            translated_text: translated.to_string(),
            detected_language: "de-DE".to_string(),
        }
    }

    #[test]
    fn test_succeeded_keeps_texts() {
        let result = TranscriptionResult::succeeded(transcript("Guten Tag", "Good day"));
        assert!(result.success());
        assert_eq!(result.original_text(), "Guten Tag");
        assert_eq!(result.translated_text(), "Good day");
        assert_eq!(result.detected_language(), "de-DE");
        assert!(result.error().is_none());
    }

    #[test]
    fn test_succeeded_falls_back_to_original_text() {
        let result = TranscriptionResult::succeeded(transcript("Hallo Welt", ""));
        assert_eq!(result.translated_text(), "Hallo Welt");
    }

    #[test]
    fn test_succeeded_never_has_empty_translation() {
        let result = TranscriptionResult::succeeded(transcript("", ""));
        assert_eq!(result.translated_text(), NO_TRANSLATION_PLACEHOLDER);
    }

    #[test]
    fn test_failed_carries_error() {
        let result = TranscriptionResult::failed("No speech detected in audio");
        assert!(!result.success());
        assert_eq!(result.error(), Some("No speech detected in audio"));
        assert!(result.original_text().is_empty());
    }

    #[test]
    fn test_serialized_failure_includes_error() {
        let json = serde_json::to_value(TranscriptionResult::failed("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn test_serialized_success_omits_error() {
        let json =
            serde_json::to_value(TranscriptionResult::succeeded(transcript("a", "b"))).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["translated_text"], "b");
        assert!(json.get("error").is_none());
    }
}
