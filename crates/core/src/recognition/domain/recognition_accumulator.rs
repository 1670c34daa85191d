use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

/// Text collected during one recognition session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fragments {
    pub original: Vec<String>,
    pub translated: Vec<String>,
    pub error: Option<String>,
}

impl Fragments {
    pub fn original_text(&self) -> String {
        join(&self.original)
    }

    pub fn translated_text(&self) -> String {
        join(&self.translated)
    }
}

fn join(fragments: &[String]) -> String {
    fragments.join(" ").trim().to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    Completed,
    TimedOut,
}

/// Collects recognizer output for one session and signals completion.
///
/// Writers are the engine's callback threads; appends are serialized by a
/// mutex. Completion fires the paired [`CompletionSignal`] at most once.
pub struct RecognitionAccumulator {
    fragments: Mutex<Fragments>,
    completed: AtomicBool,
    done_tx: Sender<()>,
}

/// Foreground half of the accumulator: blocks until completion or deadline.
pub struct CompletionSignal {
    done_rx: Receiver<()>,
}

impl RecognitionAccumulator {
    pub fn new() -> (Arc<Self>, CompletionSignal) {
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let accumulator = Arc::new(Self {
            fragments: Mutex::new(Fragments::default()),
            completed: AtomicBool::new(false),
            done_tx,
        });
        (accumulator, CompletionSignal { done_rx })
    }

    pub fn push_original(&self, text: impl Into<String>) {
        self.lock().original.push(text.into());
    }

    pub fn push_translated(&self, text: impl Into<String>) {
        self.lock().translated.push(text.into());
    }

    /// Records a terminal error and completes. The first error wins.
    pub fn fail(&self, message: impl Into<String>) {
        {
            let mut fragments = self.lock();
            if fragments.error.is_none() {
                fragments.error = Some(message.into());
            }
        }
        self.complete();
    }

    pub fn complete(&self) {
        if !self.completed.swap(true, Ordering::AcqRel) {
            let _ = self.done_tx.try_send(());
        }
    }

    pub fn snapshot(&self) -> Fragments {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Fragments> {
        self.fragments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl CompletionSignal {
    pub fn wait_until(&self, deadline: Instant) -> WaitOutcome {
        match self.done_rx.recv_deadline(deadline) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => WaitOutcome::Completed,
            Err(RecvTimeoutError::Timeout) => WaitOutcome::TimedOut,
        }
    }

    pub fn wait_timeout(&self, timeout: Duration) -> WaitOutcome {
        self.wait_until(Instant::now() + timeout)
    }
}
