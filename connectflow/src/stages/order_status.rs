//! Order status stage: turns an order id into a fulfilment status record.

use super::{json_type_name, TransformStage};
use crate::config::StageConfig;
use crate::context::PropertyStore;
use crate::core::TransformResult;
use crate::errors::TransformError;
use crate::observability::{SpanTimer, StageLogger};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Reads an order id and writes `{"status":"Order got fulfilled for order id <id>"}`.
///
/// An absent or `null` input property is treated as an empty order id. Any
/// other non-string value fails with [`TransformError::TypeMismatch`].
pub struct OrderStatusStage {
    name: String,
    logger: Arc<dyn StageLogger>,
}

impl OrderStatusStage {
    /// Default stage name.
    pub const DEFAULT_NAME: &'static str = "order_status";

    /// Creates a new order status stage reporting through `logger`.
    #[must_use]
    pub fn new(logger: Arc<dyn StageLogger>) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            logger,
        }
    }

    /// Sets the stage name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn read_input(ctx: &dyn PropertyStore, property: &str) -> Result<String, TransformError> {
        match ctx.property(property) {
            None | Some(serde_json::Value::Null) => Ok(String::new()),
            Some(serde_json::Value::String(value)) => Ok(value),
            Some(other) => Err(TransformError::type_mismatch(property, json_type_name(&other))),
        }
    }

    fn transform(&self, ctx: &mut dyn PropertyStore, config: &StageConfig) -> Result<(), TransformError> {
        let template_param = ctx.parameter(&config.template_parameter);
        self.logger.stage_entered(&self.name, template_param.as_deref());

        let order_id = Self::read_input(ctx, &config.input_property)?;
        self.logger
            .input_extracted(&self.name, &config.input_property, &order_id);

        let result = TransformResult::order_fulfilled(&order_id);
        let wire = result.to_wire(config.serialization)?;
        let serialized = match &wire {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };

        // Single write; nothing touches ctx before this point.
        ctx.set_property(&config.output_property, wire)
            .map_err(|e| TransformError::write_failure(&config.output_property, e))?;

        self.logger
            .result_written(&self.name, &config.output_property, &serialized);
        Ok(())
    }
}

impl std::fmt::Debug for OrderStatusStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStatusStage")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TransformStage for OrderStatusStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, ctx: &mut dyn PropertyStore, config: &StageConfig) -> Result<(), TransformError> {
        let timer = SpanTimer::start(&self.name);

        let outcome = catch_unwind(AssertUnwindSafe(|| self.transform(ctx, config)))
            .unwrap_or_else(|payload| Err(TransformError::from_panic(payload.as_ref())));

        if let Err(ref err) = outcome {
            self.logger.stage_failed(&self.name, err, timer.elapsed_ms());
        }
        outcome
    }
}
