//! Transcription and translation of remote audio recordings.
//!
//! The crate is split into bounded contexts. Each context keeps its traits
//! and pure logic under `domain` and its adapters to external services under
//! `infrastructure`. Use cases that tie the contexts together live in
//! `pipeline`.

pub mod audio {
    pub mod domain {
        pub mod audio_fetcher;
        pub mod local_audio;
    }
    pub mod infrastructure {
        pub mod http_audio_fetcher;
    }
}

pub mod language {
    pub mod domain {
        pub mod language_normalizer;
        pub mod supported_language;
    }
}

pub mod recognition {
    pub mod domain {
        pub mod recognition_accumulator;
        pub mod recognition_engine;
        pub mod recognition_event;
        pub mod recognition_session;
    }
    pub mod infrastructure {
        mod azure_messages;
        pub mod azure_speech_engine;
    }
}

pub mod pipeline {
    pub mod pipeline_logger;
    pub mod transcribe_audio_use_case;
}

pub mod shared {
    pub mod constants;
    pub mod speech_settings;
    pub mod transcription;
    pub mod transcription_error;
}

#[cfg(test)]
mod test_support;
