use std::collections::HashMap;

/// Why a recognizer produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultReason {
    RecognizedSpeech,
    TranslatedSpeech,
    /// Audio was processed but no speech could be matched.
    NoMatch,
}

/// Why a recognizer stopped before its session ended normally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CancellationReason {
    EndOfStream,
    Error,
}

/// Notification delivered by a running recognizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionEvent {
    Recognized {
        reason: ResultReason,
        text: String,
        /// Translated text keyed by target language, e.g. `en`.
        translations: HashMap<String, String>,
    },
    SessionStopped,
    Canceled {
        reason: CancellationReason,
        error_details: String,
    },
}

impl RecognitionEvent {
    pub fn recognized(text: impl Into<String>) -> Self {
        Self::Recognized {
            reason: ResultReason::RecognizedSpeech,
            text: text.into(),
            translations: HashMap::new(),
        }
    }

    pub fn translated<I, K, V>(text: impl Into<String>, translations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Recognized {
            reason: ResultReason::TranslatedSpeech,
            text: text.into(),
            translations: translations
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn no_match() -> Self {
        Self::Recognized {
            reason: ResultReason::NoMatch,
            text: String::new(),
            translations: HashMap::new(),
        }
    }

    /// The audio source ran out before the session stopped on its own.
    pub fn end_of_stream() -> Self {
        Self::Canceled {
            reason: CancellationReason::EndOfStream,
            error_details: String::new(),
        }
    }

    pub fn canceled_with_error(details: impl Into<String>) -> Self {
        Self::Canceled {
            reason: CancellationReason::Error,
            error_details: details.into(),
        }
    }

    /// No further events follow a terminal one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SessionStopped | Self::Canceled { .. })
    }
}
