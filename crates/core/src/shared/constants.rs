use std::time::Duration;

/// Source language assumed when a request does not name one.
///
/// Most recordings handled by the prompt tooling are German, which is a
/// product decision rather than a technical one. Revisit if the workload
/// changes.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "de-DE";

/// The only language results are translated into.
pub const TARGET_LANGUAGE: &str = "en";

pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on how long a recognition session may run before the
/// collected fragments are used as they are.
pub const RECOGNITION_TIMEOUT: Duration = Duration::from_secs(60);

pub const AUDIO_FILE_SUFFIX: &str = ".wav";

pub const NO_SPEECH_PLACEHOLDER: &str = "(No speech detected)";
pub const NO_TRANSLATION_PLACEHOLDER: &str = "(No translation available)";

pub const SPEECH_KEY_ENV: &str = "AZURE_SPEECH_KEY";
pub const SPEECH_REGION_ENV: &str = "AZURE_SPEECH_REGION";
