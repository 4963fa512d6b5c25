//! Test fixtures for stage testing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::StageConfig;
use crate::context::MessageContext;
use crate::errors::TransformError;
use crate::observability::{CollectingStageLogger, LogRecord};
use crate::stages::{OrderStatusStage, TransformStage};

/// Runs a stage against prepared contexts and captures everything it did.
#[derive(Debug)]
pub struct StageHarness {
    stage: Arc<dyn TransformStage>,
    logger: Arc<CollectingStageLogger>,
    config: StageConfig,
}

/// The outcome of one harness run.
#[derive(Debug)]
pub struct HarnessRun {
    /// Properties before the stage ran.
    pub before: HashMap<String, serde_json::Value>,
    /// The context after the stage ran.
    pub context: MessageContext,
    /// The stage result.
    pub result: Result<(), TransformError>,
    /// Log records emitted during this run.
    pub records: Vec<LogRecord>,
}

impl HarnessRun {
    /// Returns true if the stage succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

impl StageHarness {
    /// Creates a harness around an order status stage with default config.
    #[must_use]
    pub fn order_status() -> Self {
        let logger = Arc::new(CollectingStageLogger::new());
        let stage = Arc::new(OrderStatusStage::new(logger.clone()));
        Self {
            stage,
            logger,
            config: StageConfig::default(),
        }
    }

    /// Creates a harness around any stage.
    ///
    /// `logger` should be the logger the stage was built with.
    #[must_use]
    pub fn new(stage: Arc<dyn TransformStage>, logger: Arc<CollectingStageLogger>) -> Self {
        Self {
            stage,
            logger,
            config: StageConfig::default(),
        }
    }

    /// Sets the configuration used for runs.
    #[must_use]
    pub fn with_config(mut self, config: StageConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the stage on `ctx`.
    #[must_use]
    pub fn run(&self, mut ctx: MessageContext) -> HarnessRun {
        self.logger.clear();
        let before = ctx.to_dict();
        let result = self.stage.execute(&mut ctx, &self.config);

        HarnessRun {
            before,
            context: ctx,
            result,
            records: self.logger.records(),
        }
    }

    /// Runs the stage on a context holding only the given properties.
    #[must_use]
    pub fn run_with(&self, properties: &[(&str, serde_json::Value)]) -> HarnessRun {
        let ctx = properties
            .iter()
            .fold(MessageContext::new(), |ctx, (k, v)| ctx.with_property(*k, v.clone()));
        self.run(ctx)
    }
}
