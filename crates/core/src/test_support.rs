//! Stub collaborators shared by the unit tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::recognition::domain::recognition_engine::{
    ActiveRecognition, EngineError, RecognitionEngine, RecognitionListener, RecognizerConfig,
};
use crate::recognition::domain::recognition_event::RecognitionEvent;

/// What a [`ScriptedEngine`] was asked to do.
#[derive(Default)]
pub struct EngineCalls {
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
    pub configs: Mutex<Vec<RecognizerConfig>>,
    pub audio_paths: Mutex<Vec<PathBuf>>,
}

impl EngineCalls {
    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<RecognizerConfig> {
        self.configs.lock().unwrap().last().cloned()
    }
}

enum Behaviour {
    Script(Vec<RecognitionEvent>),
    FailToStart(String),
    Panic,
}

/// Engine that replays a fixed list of events from a background thread.
pub struct ScriptedEngine {
    behaviour: Behaviour,
    delay: Duration,
    stop_failure: Option<String>,
    calls: Arc<EngineCalls>,
}

impl ScriptedEngine {
    pub fn new(script: Vec<RecognitionEvent>) -> Self {
        Self {
            behaviour: Behaviour::Script(script),
            delay: Duration::ZERO,
            stop_failure: None,
            calls: Arc::new(EngineCalls::default()),
        }
    }

    /// Never emits anything, so every session runs into its deadline.
    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behaviour: Behaviour::FailToStart(message.to_string()),
            ..Self::silent()
        }
    }

    pub fn panicking() -> Self {
        Self {
            behaviour: Behaviour::Panic,
            ..Self::silent()
        }
    }

    /// Sleep before each event.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Make `stop` fail with `message` after recording the call.
    pub fn with_stop_failure(mut self, message: &str) -> Self {
        self.stop_failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Arc<EngineCalls> {
        self.calls.clone()
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn start(
        &self,
        config: &RecognizerConfig,
        audio: &Path,
        listener: Arc<dyn RecognitionListener>,
    ) -> Result<Box<dyn ActiveRecognition>, EngineError> {
        self.calls.starts.fetch_add(1, Ordering::SeqCst);
        self.calls.configs.lock().unwrap().push(config.clone());
        self.calls
            .audio_paths
            .lock()
            .unwrap()
            .push(audio.to_path_buf());

        let script = match &self.behaviour {
            Behaviour::Script(script) => script.clone(),
            Behaviour::FailToStart(message) => return Err(EngineError::Start(message.clone())),
            Behaviour::Panic => panic!("engine crashed"),
        };

        let stopped = Arc::new(AtomicBool::new(false));
        let flag = stopped.clone();
        let delay = self.delay;
        thread::spawn(move || {
            for event in script {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                listener.on_event(event);
            }
        });

        Ok(Box::new(ScriptedRecognition {
            stopped,
            stop_failure: self.stop_failure.clone(),
            calls: self.calls.clone(),
        }))
    }
}

struct ScriptedRecognition {
    stopped: Arc<AtomicBool>,
    stop_failure: Option<String>,
    calls: Arc<EngineCalls>,
}

impl ActiveRecognition for ScriptedRecognition {
    fn stop(&mut self) -> Result<(), EngineError> {
        self.stopped.store(true, Ordering::SeqCst);
        self.calls.stops.fetch_add(1, Ordering::SeqCst);
        match &self.stop_failure {
            Some(message) => Err(EngineError::Stop(message.clone())),
            None => Ok(()),
        }
    }
}
