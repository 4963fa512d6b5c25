//! Logging capability injected into stages.
//!
//! Stages never reach for a process-wide logger. They receive an
//! `Arc<dyn StageLogger>` at construction and report through it.

use crate::errors::TransformError;
use parking_lot::RwLock;
use std::time::Instant;

/// Receives the observability lines a stage emits during one invocation.
pub trait StageLogger: Send + Sync {
    /// The stage was entered. `template_param` is the host-resolved
    /// descriptive parameter, if any.
    fn stage_entered(&self, stage: &str, template_param: Option<&str>);

    /// The input value was extracted from `property`.
    fn input_extracted(&self, stage: &str, property: &str, value: &str);

    /// The serialized result was written to `property`.
    fn result_written(&self, stage: &str, property: &str, serialized: &str);

    /// The stage returned an error.
    fn stage_failed(&self, stage: &str, error: &TransformError, duration_ms: f64);
}

/// No-op stage logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStageLogger;

impl StageLogger for NoOpStageLogger {
    fn stage_entered(&self, _stage: &str, _template_param: Option<&str>) {}
    fn input_extracted(&self, _stage: &str, _property: &str, _value: &str) {}
    fn result_written(&self, _stage: &str, _property: &str, _serialized: &str) {}
    fn stage_failed(&self, _stage: &str, _error: &TransformError, _duration_ms: f64) {}
}

/// Stage logger backed by the `tracing` framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStageLogger;

impl StageLogger for TracingStageLogger {
    fn stage_entered(&self, stage: &str, template_param: Option<&str>) {
        tracing::info!(
            stage,
            template_param = template_param.unwrap_or_default(),
            "Stage received message"
        );
    }

    fn input_extracted(&self, stage: &str, property: &str, value: &str) {
        tracing::info!(stage, property, value, "Input property extracted");
    }

    fn result_written(&self, stage: &str, property: &str, serialized: &str) {
        tracing::info!(stage, property, response = serialized, "Result written");
    }

    fn stage_failed(&self, stage: &str, error: &TransformError, duration_ms: f64) {
        tracing::error!(
            stage,
            kind = %error.kind(),
            duration_ms,
            error = %error,
            "Stage failed"
        );
    }
}

/// One line captured by a [`CollectingStageLogger`].
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    /// See [`StageLogger::stage_entered`].
    Entered {
        /// Stage name.
        stage: String,
        /// Template parameter value.
        template_param: Option<String>,
    },
    /// See [`StageLogger::input_extracted`].
    InputExtracted {
        /// Stage name.
        stage: String,
        /// Property read.
        property: String,
        /// Extracted value.
        value: String,
    },
    /// See [`StageLogger::result_written`].
    ResultWritten {
        /// Stage name.
        stage: String,
        /// Property written.
        property: String,
        /// Serialized result.
        serialized: String,
    },
    /// See [`StageLogger::stage_failed`].
    Failed {
        /// Stage name.
        stage: String,
        /// Rendered error.
        error: String,
    },
}

/// A collecting stage logger for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingStageLogger {
    records: RwLock<Vec<LogRecord>>,
}

impl CollectingStageLogger {
    /// Creates a new collecting logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected records.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.read().clone()
    }

    /// Returns the number of collected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Clears all collected records.
    pub fn clear(&self) {
        self.records.write().clear();
    }

    fn push(&self, record: LogRecord) {
        self.records.write().push(record);
    }
}

impl StageLogger for CollectingStageLogger {
    fn stage_entered(&self, stage: &str, template_param: Option<&str>) {
        self.push(LogRecord::Entered {
            stage: stage.to_string(),
            template_param: template_param.map(str::to_string),
        });
    }

    fn input_extracted(&self, stage: &str, property: &str, value: &str) {
        self.push(LogRecord::InputExtracted {
            stage: stage.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        });
    }

    fn result_written(&self, stage: &str, property: &str, serialized: &str) {
        self.push(LogRecord::ResultWritten {
            stage: stage.to_string(),
            property: property.to_string(),
            serialized: serialized.to_string(),
        });
    }

    fn stage_failed(&self, stage: &str, error: &TransformError, _duration_ms: f64) {
        self.push(LogRecord::Failed {
            stage: stage.to_string(),
            error: error.to_string(),
        });
    }
}

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
    name: String,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
