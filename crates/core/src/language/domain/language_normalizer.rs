use crate::shared::constants::DEFAULT_SOURCE_LANGUAGE;

/// Lower-cased regional codes mapped to the casing the recognizer expects.
const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("de-de", "de-DE"),
    ("de-at", "de-AT"),
    ("de-ch", "de-CH"),
    ("fr-fr", "fr-FR"),
    ("fr-ca", "fr-CA"),
    ("es-es", "es-ES"),
    ("es-mx", "es-MX"),
    ("it-it", "it-IT"),
    ("nl-nl", "nl-NL"),
    ("pt-br", "pt-BR"),
    ("pt-pt", "pt-PT"),
    ("pl-pl", "pl-PL"),
    ("ja-jp", "ja-JP"),
    ("zh-cn", "zh-CN"),
    ("ko-kr", "ko-KR"),
    ("ru-ru", "ru-RU"),
    ("ar-sa", "ar-SA"),
    ("en-us", "en-US"),
    ("en-gb", "en-GB"),
    ("en-au", "en-AU"),
];

/// A recognizer language code together with its language family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLanguage {
    /// e.g. `de-DE`
    pub canonical: String,
    /// e.g. `de`
    pub base: String,
}

impl ResolvedLanguage {
    fn from_canonical(canonical: String) -> Self {
        let base = canonical
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();
        Self { canonical, base }
    }
}

/// Resolves a loosely formatted language code to the recognizer's format.
///
/// Missing or empty input resolves to [`DEFAULT_SOURCE_LANGUAGE`]. Codes not
/// in the map are passed through unchanged. Never fails.
pub fn normalize(raw: Option<&str>) -> ResolvedLanguage {
    let raw = match raw {
        Some(code) if !code.is_empty() => code,
        _ => return ResolvedLanguage::from_canonical(DEFAULT_SOURCE_LANGUAGE.to_string()),
    };

    let lowered = raw.to_lowercase();
    let canonical = LANGUAGE_MAP
        .iter()
        .find(|(key, _)| *key == lowered)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| raw.to_string());

    ResolvedLanguage::from_canonical(canonical)
}

/// Whether the raw, not yet normalized code names English.
pub fn is_english(raw: Option<&str>) -> bool {
    raw.is_some_and(|code| code.to_lowercase().starts_with("en"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_none_resolves_to_default() {
        let resolved = normalize(None);
        assert_eq!(resolved.canonical, "de-DE");
        assert_eq!(resolved.base, "de");
    }

    #[test]
    fn test_empty_resolves_to_default() {
        assert_eq!(normalize(Some("")), normalize(None));
    }

    #[rstest]
    #[case::lower("de-de", "de-DE", "de")]
    #[case::upper("FR-CA", "fr-CA", "fr")]
    #[case::mixed("Pt-bR", "pt-BR", "pt")]
    #[case::already_canonical("en-GB", "en-GB", "en")]
    #[case::unknown_region("sv-SE", "sv-SE", "sv")]
    #[case::unknown_lowercase("sv-se", "sv-se", "sv")]
    #[case::bare_family("de", "de", "de")]
    #[case::free_form("German", "German", "German")]
    fn test_normalize(#[case] raw: &str, #[case] canonical: &str, #[case] base: &str) {
        let resolved = normalize(Some(raw));
        assert_eq!(resolved.canonical, canonical);
        assert_eq!(resolved.base, base);
    }

    #[rstest]
    #[case("de-de")]
    #[case("DE-AT")]
    #[case("sv-se")]
    #[case("en-au")]
    #[case("  ")]
    #[case("x-")]
    #[case("")]
    fn test_normalize_is_idempotent(#[case] raw: &str) {
        let once = normalize(Some(raw));
        let twice = normalize(Some(&once.canonical));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_every_map_entry_is_idempotent() {
        for (key, canonical) in LANGUAGE_MAP {
            assert_eq!(normalize(Some(key)).canonical, *canonical);
            assert_eq!(normalize(Some(canonical)).canonical, *canonical);
        }
    }

    #[rstest]
    #[case(Some("en-US"), true)]
    #[case(Some("EN-gb"), true)]
    #[case(Some("english"), true)]
    #[case(Some("de-DE"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn test_is_english(#[case] raw: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_english(raw), expected);
    }
}
