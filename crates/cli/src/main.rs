use std::process;
use std::time::Duration;

use clap::Parser;

use promptscribe_core::audio::infrastructure::http_audio_fetcher::HttpAudioFetcher;
use promptscribe_core::language::domain::supported_language::supported_languages;
use promptscribe_core::pipeline::pipeline_logger::{LogPipelineLogger, PipelineLogger};
use promptscribe_core::pipeline::transcribe_audio_use_case::TranscribeAudioUseCase;
use promptscribe_core::recognition::domain::recognition_engine::RecognitionEngine;
use promptscribe_core::recognition::domain::recognition_session::SessionConfig;
use promptscribe_core::recognition::infrastructure::azure_speech_engine::AzureSpeechEngine;
use promptscribe_core::shared::constants::RECOGNITION_TIMEOUT;
use promptscribe_core::shared::speech_settings::SpeechSettings;
use promptscribe_core::shared::transcription::TranscriptionRequest;

/// Transcribe a remote audio recording and translate it to English.
///
/// Reads AZURE_SPEECH_KEY and AZURE_SPEECH_REGION from the environment.
#[derive(Parser)]
#[command(name = "promptscribe")]
struct Cli {
    /// URL of the audio recording.
    #[arg(required_unless_present = "list_languages")]
    audio_url: Option<String>,

    /// Source language code (e.g. de-DE). English skips translation.
    #[arg(long)]
    language: Option<String>,

    /// Maximum seconds to wait for recognition to finish.
    #[arg(long, default_value_t = RECOGNITION_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Print the supported source languages and exit.
    #[arg(long)]
    list_languages: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns whether the transcription succeeded.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.list_languages {
        print_json(&supported_languages(), cli.pretty)?;
        return Ok(true);
    }

    let audio_url = cli.audio_url.ok_or("an audio URL is required")?;
    let use_case = build_use_case(cli.timeout_secs)?;
    let request = TranscriptionRequest::new(audio_url, cli.language);

    let mut logger = LogPipelineLogger::new();
    let result = use_case.run_logged(&request, &mut logger);
    logger.summary();

    print_json(&result, cli.pretty)?;
    Ok(result.success())
}

fn build_use_case(
    timeout_secs: u64,
) -> Result<TranscribeAudioUseCase, Box<dyn std::error::Error>> {
    let settings = SpeechSettings::from_env();
    log::debug!("Speech settings: {settings:?}");

    let engine: Option<Box<dyn RecognitionEngine>> = match settings.credentials() {
        Some(credentials) => Some(Box::new(AzureSpeechEngine::new(credentials)?)),
        None => {
            log::warn!("Speech service credentials are missing");
            None
        }
    };

    Ok(
        TranscribeAudioUseCase::new(Box::new(HttpAudioFetcher::new()?), engine)
            .with_session_config(SessionConfig {
                timeout: Duration::from_secs(timeout_secs),
            }),
    )
}

fn print_json<T: serde::Serialize + ?Sized>(
    value: &T,
    pretty: bool,
) -> Result<(), serde_json::Error> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_url_and_language() {
        let cli = Cli::parse_from(["promptscribe", "https://x/a.wav", "--language", "fr-FR"]);
        assert_eq!(cli.audio_url.as_deref(), Some("https://x/a.wav"));
        assert_eq!(cli.language.as_deref(), Some("fr-FR"));
        assert_eq!(cli.timeout_secs, 60);
        assert!(!cli.list_languages);
    }

    #[test]
    fn test_list_languages_needs_no_url() {
        let cli = Cli::parse_from(["promptscribe", "--list-languages"]);
        assert!(cli.list_languages);
        assert!(cli.audio_url.is_none());
    }

    #[test]
    fn test_url_required_otherwise() {
        assert!(Cli::try_parse_from(["promptscribe"]).is_err());
    }
}
