//! Observability utilities.

mod logger;
mod subscriber;

pub use logger::{
    CollectingStageLogger, LogRecord, NoOpStageLogger, SpanTimer, StageLogger,
    TracingStageLogger,
};
pub use subscriber::{init_logging, LogFormat};
