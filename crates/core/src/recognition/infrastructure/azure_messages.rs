use serde::{Deserialize, Serialize};

/// Response of the short-audio recognition endpoint in `simple` format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct RecognitionResponse {
    pub recognition_status: String,
    #[serde(default)]
    pub display_text: String,
}

impl RecognitionResponse {
    /// Statuses that end a session normally without any recognized speech.
    pub fn is_no_match(&self) -> bool {
        matches!(
            self.recognition_status.as_str(),
            "NoMatch" | "InitialSilenceTimeout" | "BabbleTimeout" | "EndOfDictation"
        )
    }

    pub fn is_success(&self) -> bool {
        self.recognition_status == "Success"
    }
}

#[derive(Debug, Serialize)]
pub(super) struct TranslateItem<'a> {
    #[serde(rename = "Text")]
    pub text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct TranslateResult {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Translation {
    pub text: String,
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let json = r#"{"RecognitionStatus":"Success","DisplayText":"Guten Tag.","Offset":300000,"Duration":9300000}"#;
        let response: RecognitionResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());
        assert_eq!(response.display_text, "Guten Tag.");
    }

    #[test]
    fn test_parse_no_match_without_text() {
        let json = r#"{"RecognitionStatus":"InitialSilenceTimeout","Offset":0,"Duration":0}"#;
        let response: RecognitionResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_no_match());
        assert!(response.display_text.is_empty());
    }

    #[test]
    fn test_translate_item_serializes_capitalized_field() {
        let body = serde_json::to_string(&[TranslateItem { text: "Hallo" }]).unwrap();
        assert_eq!(body, r#"[{"Text":"Hallo"}]"#);
    }

    #[test]
    fn test_parse_translate_result() {
        let json = r#"[{"translations":[{"text":"Hello","to":"en"}]}]"#;
        let results: Vec<TranslateResult> = serde_json::from_str(json).unwrap();
        assert_eq!(results[0].translations[0].text, "Hello");
        assert_eq!(results[0].translations[0].to, "en");
    }
}
