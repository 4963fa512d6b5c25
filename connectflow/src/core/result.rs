//! The status record a transform stage produces.

use crate::config::SerializationPolicy;
use serde::{Deserialize, Serialize};

const ORDER_FULFILLED_PREFIX: &str = "Order got fulfilled for order id ";

/// Output of a transform stage.
///
/// Serializes to `{"status":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Human-readable status message.
    pub status: String,
}

impl TransformResult {
    /// Creates a result with the given status.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }

    /// Creates the fulfilment status for an order id.
    #[must_use]
    pub fn order_fulfilled(order_id: &str) -> Self {
        Self::new(format!("{ORDER_FULFILLED_PREFIX}{order_id}"))
    }

    /// Renders the result to the compact JSON text form.
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Renders the result to the value written into a context property.
    ///
    /// `Text` yields a JSON string holding the compact document, `Structured`
    /// yields the object itself.
    pub fn to_wire(&self, policy: SerializationPolicy) -> Result<serde_json::Value, serde_json::Error> {
        match policy {
            SerializationPolicy::Text => self.to_text().map(serde_json::Value::String),
            SerializationPolicy::Structured => serde_json::to_value(self),
        }
    }

    /// Parses a result back from either wire form.
    ///
    /// Returns `None` if the value is neither a status object nor text
    /// containing one.
    #[must_use]
    pub fn from_wire(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(text) => serde_json::from_str(text).ok(),
            serde_json::Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransformResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.status)
    }
}
