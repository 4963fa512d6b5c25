//! Error types for connectflow stages.
//!
//! Every failure a stage can hit is surfaced as a single [`TransformError`]
//! carrying the underlying cause. Hosts inspect [`TransformError::kind`] or
//! [`TransformError::to_dict`] to decide what happens to the message next.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The unified error returned from a stage invocation.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The input property exists but does not hold a string.
    #[error("Type mismatch: property '{property}' holds {found}, expected string")]
    TypeMismatch {
        /// The property that was read.
        property: String,
        /// The JSON type that was found instead.
        found: &'static str,
    },

    /// The result could not be rendered to its wire form.
    #[error("Serialization failure: {0}")]
    SerializationFailure(#[source] serde_json::Error),

    /// The host context rejected the output write.
    #[error("Write failure: property '{property}': {source}")]
    WriteFailure {
        /// The property the stage tried to write.
        property: String,
        /// Why the context rejected it.
        #[source]
        source: ContextError,
    },

    /// Any other failure caught at the stage boundary.
    #[error("Unknown stage failure: {0}")]
    Unknown(#[source] anyhow::Error),
}

/// Discriminant of a [`TransformError`], stable for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`TransformError::TypeMismatch`].
    TypeMismatch,
    /// See [`TransformError::SerializationFailure`].
    SerializationFailure,
    /// See [`TransformError::WriteFailure`].
    WriteFailure,
    /// See [`TransformError::Unknown`].
    Unknown,
}

impl ErrorKind {
    /// Returns the kind as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "TypeMismatch",
            Self::SerializationFailure => "SerializationFailure",
            Self::WriteFailure => "WriteFailure",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransformError {
    /// Creates a type mismatch error for a property.
    #[must_use]
    pub fn type_mismatch(property: impl Into<String>, found: &'static str) -> Self {
        Self::TypeMismatch {
            property: property.into(),
            found,
        }
    }

    /// Creates a write failure error for a property.
    #[must_use]
    pub fn write_failure(property: impl Into<String>, source: ContextError) -> Self {
        Self::WriteFailure {
            property: property.into(),
            source,
        }
    }

    /// Creates an unknown error from a panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::Unknown(anyhow::anyhow!("stage panicked: {message}"))
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::SerializationFailure(_) => ErrorKind::SerializationFailure,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(self.kind().as_str()));

        match self {
            Self::TypeMismatch { property, found } => {
                map.insert("property".to_string(), serde_json::json!(property));
                map.insert("found".to_string(), serde_json::json!(found));
            }
            Self::WriteFailure { property, source } => {
                map.insert("property".to_string(), serde_json::json!(property));
                map.insert("cause".to_string(), serde_json::json!(source.to_string()));
            }
            Self::SerializationFailure(err) => {
                map.insert("cause".to_string(), serde_json::json!(err.to_string()));
            }
            Self::Unknown(err) => {
                map.insert("cause".to_string(), serde_json::json!(format!("{err:#}")));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

impl From<serde_json::Error> for TransformError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationFailure(err)
    }
}

/// Errors raised by a host context when a property write is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The context was finalized by the host and accepts no more writes.
    #[error("message context is finalized")]
    Finalized,

    /// The property is locked read-only by the host.
    #[error("property '{key}' is read-only")]
    ReadOnly {
        /// The locked key.
        key: String,
    },
}

impl ContextError {
    /// Creates a read-only error.
    #[must_use]
    pub fn read_only(key: impl Into<String>) -> Self {
        Self::ReadOnly { key: key.into() }
    }
}

/// Errors raised while resolving a stage configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for a stage config.
    #[error("Invalid stage configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A field failed validation.
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates a validation error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
