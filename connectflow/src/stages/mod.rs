//! Transform stage trait and implementations.
//!
//! A stage is a leaf unit a host pipeline invokes once per in-flight message.

mod order_status;

pub use order_status::OrderStatusStage;

use crate::config::StageConfig;
use crate::context::PropertyStore;
use crate::errors::TransformError;
use std::fmt::Debug;

/// Trait for pluggable transform stages.
///
/// Implementations hold no per-message state and may be invoked
/// concurrently from many threads, each call with its own context.
pub trait TransformStage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Transforms one message.
    ///
    /// Reads the configured input property from `ctx`, derives a result and
    /// writes it to the configured output property. On error `ctx` is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns a `TransformError` wrapping whatever went wrong.
    fn execute(&self, ctx: &mut dyn PropertyStore, config: &StageConfig) -> Result<(), TransformError>;
}

/// Returns the JSON type name of a value, as used in type mismatch errors.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
