//! Stage configuration resolved by the host from a pipeline definition.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// How a stage writes its result into the output property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationPolicy {
    /// Write the compact JSON text of the result as a string value.
    #[default]
    Text,
    /// Write the result as a structured JSON object.
    Structured,
}

impl SerializationPolicy {
    /// Parses a policy name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for unknown names.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "structured" => Ok(Self::Structured),
            other => Err(ConfigError::invalid(
                "serialization",
                format!("unknown policy '{other}', expected 'text' or 'structured'"),
            )),
        }
    }
}

impl std::fmt::Display for SerializationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// Configuration for a transform stage invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConfig {
    /// Name of the property to read.
    #[serde(default = "default_input_property")]
    pub input_property: String,
    /// Name of the property to write the result into.
    #[serde(default = "default_output_property")]
    pub output_property: String,
    /// Wire form of the written result.
    #[serde(default)]
    pub serialization: SerializationPolicy,
    /// Template parameter logged on stage entry.
    #[serde(default = "default_template_parameter")]
    pub template_parameter: String,
}

fn default_input_property() -> String {
    "orderId".to_string()
}

fn default_output_property() -> String {
    "responseBody".to_string()
}

fn default_template_parameter() -> String {
    "generated_param".to_string()
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            input_property: default_input_property(),
            output_property: default_output_property(),
            serialization: SerializationPolicy::default(),
            template_parameter: default_template_parameter(),
        }
    }
}

impl StageConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input property.
    #[must_use]
    pub fn with_input_property(mut self, name: impl Into<String>) -> Self {
        self.input_property = name.into();
        self
    }

    /// Sets the output property.
    #[must_use]
    pub fn with_output_property(mut self, name: impl Into<String>) -> Self {
        self.output_property = name.into();
        self
    }

    /// Sets the serialization policy.
    #[must_use]
    pub fn with_serialization(mut self, policy: SerializationPolicy) -> Self {
        self.serialization = policy;
        self
    }

    /// Sets the template parameter logged on entry.
    #[must_use]
    pub fn with_template_parameter(mut self, name: impl Into<String>) -> Self {
        self.template_parameter = name.into();
        self
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Builds a configuration from host-resolved pipeline parameters.
    ///
    /// Missing keys fall back to defaults.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = params.get("inputProperty") {
            config.input_property.clone_from(v);
        }
        if let Some(v) = params.get("outputProperty") {
            config.output_property.clone_from(v);
        }
        if let Some(v) = params.get("serialization") {
            config.serialization = SerializationPolicy::parse(v)?;
        }
        if let Some(v) = params.get("templateParameter") {
            config.template_parameter.clone_from(v);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the property names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_property.trim().is_empty() {
            return Err(ConfigError::invalid("inputProperty", "must not be empty"));
        }
        if self.output_property.trim().is_empty() {
            return Err(ConfigError::invalid("outputProperty", "must not be empty"));
        }
        Ok(())
    }
}
