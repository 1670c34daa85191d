use serde::Serialize;

/// A source language offered to users, keyed by its lower-cased code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SupportedLanguage {
    pub code: &'static str,
    pub name: &'static str,
}

const fn language(code: &'static str, name: &'static str) -> SupportedLanguage {
    SupportedLanguage { code, name }
}

const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    language("de-de", "German (Germany)"),
    language("de-at", "German (Austria)"),
    language("de-ch", "German (Switzerland)"),
    language("fr-fr", "French (France)"),
    language("fr-ca", "French (Canada)"),
    language("es-es", "Spanish (Spain)"),
    language("es-mx", "Spanish (Mexico)"),
    language("it-it", "Italian"),
    language("nl-nl", "Dutch"),
    language("pt-br", "Portuguese (Brazil)"),
    language("pl-pl", "Polish"),
    language("ja-jp", "Japanese"),
    language("en-us", "English (US)"),
    language("en-gb", "English (UK)"),
];

/// Source languages offered for transcription and translation.
pub fn supported_languages() -> &'static [SupportedLanguage] {
    SUPPORTED_LANGUAGES
}
