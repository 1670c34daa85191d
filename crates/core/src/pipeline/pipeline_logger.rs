use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for transcription pipeline events.
///
/// Decouples the use case from specific output mechanisms so each caller can
/// observe pipeline behavior without changing the orchestration code.
pub trait PipelineLogger: Send {
    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Log a recoverable problem that was folded into the result.
    fn warn(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// Forwards messages to the `log` crate and keeps per-stage timings for a
/// summary at the end of a run.
pub struct LogPipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    messages: Vec<String>,
    warnings: usize,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            start_time: Instant::now(),
            messages: Vec::new(),
            warnings: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Transcription summary ({:.1}s total, {} warnings):",
            elapsed_ms / 1000.0,
            self.warnings
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let total_ms: f64 = self.timings[stage].iter().sum();
            lines.push(format!("  {stage:12}: {total_ms:7.0}ms"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        self.messages.push(message.to_string());
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.timing("download", 5.0);
        logger.info("hello");
        logger.warn("careful");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = LogPipelineLogger::new();
        logger.timing("download", 20.0);
        logger.timing("recognition", 1500.0);

        assert_eq!(logger.timings_for("download"), Some(&[20.0][..]));
        assert_eq!(logger.timings_for("recognition"), Some(&[1500.0][..]));
        assert!(logger.timings_for("missing").is_none());
    }

    #[test]
    fn test_summary_lists_stages() {
        let mut logger = LogPipelineLogger::new();
        logger.timing("recognition", 30.0);
        logger.timing("download", 20.0);
        logger.warn("slow");

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Transcription summary"));
        assert!(summary.contains("1 warnings"));
        let download = summary.find("download").unwrap();
        let recognition = summary.find("recognition").unwrap();
        assert!(download < recognition);
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(LogPipelineLogger::new().summary_string().is_none());
    }

    #[test]
    fn test_messages_are_kept() {
        let mut logger = LogPipelineLogger::default();
        logger.info("downloaded");
        logger.warn("timed out");
        assert_eq!(logger.messages, vec!["downloaded", "timed out"]);
        assert_eq!(logger.warnings, 1);
    }
}
