//! Message identity for correlating log lines across a pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Identifies one in-flight message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIdentity {
    /// The unique ID for this message.
    pub message_id: Uuid,

    /// Correlation ID shared by related messages, when the host assigns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,

    /// When the host accepted the message.
    pub received_at: DateTime<Utc>,
}

impl Default for MessageIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageIdentity {
    /// Creates a new identity with a generated message ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message_id: Uuid::new_v4(),
            correlation_id: None,
            received_at: Utc::now(),
        }
    }

    /// Creates an identity with a specific message ID.
    #[must_use]
    pub fn with_message_id(message_id: Uuid) -> Self {
        Self {
            message_id,
            ..Self::new()
        }
    }

    /// Sets the correlation ID.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Converts to a dictionary with string values (or null).
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        map.insert(
            "message_id".to_string(),
            serde_json::json!(self.message_id.to_string()),
        );
        map.insert(
            "correlation_id".to_string(),
            self.correlation_id
                .map_or(serde_json::Value::Null, |id| serde_json::json!(id.to_string())),
        );
        map.insert(
            "received_at".to_string(),
            serde_json::json!(self.received_at.to_rfc3339()),
        );

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_distinct_ids() {
        let a = MessageIdentity::new();
        let b = MessageIdentity::new();
        assert_ne!(a.message_id, b.message_id);
        assert!(a.correlation_id.is_none());
    }

    #[test]
    fn test_with_message_id() {
        let id = Uuid::new_v4();
        let identity = MessageIdentity::with_message_id(id);
        assert_eq!(identity.message_id, id);
    }

    #[test]
    fn test_to_dict() {
        let correlation = Uuid::new_v4();
        let identity = MessageIdentity::new().with_correlation_id(correlation);
        let dict = identity.to_dict();

        assert_eq!(
            dict.get("correlation_id"),
            Some(&serde_json::json!(correlation.to_string()))
        );
        assert!(dict.contains_key("message_id"));
        assert!(dict.contains_key("received_at"));
    }

    #[test]
    fn test_to_dict_without_correlation() {
        let dict = MessageIdentity::new().to_dict();
        assert_eq!(dict.get("correlation_id"), Some(&serde_json::Value::Null));
    }
}
