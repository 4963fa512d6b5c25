//! In-memory message context used by hosts and tests.

use super::{MessageIdentity, PropertyStore};
use crate::errors::ContextError;
use std::collections::{HashMap, HashSet};

/// The per-request state bag flowing through a host pipeline.
///
/// Holds loosely typed properties, an opaque body and the template
/// parameters the host resolved for the current stage. Hosts can lock
/// individual properties or finalize the whole context; either makes
/// subsequent writes fail with a [`ContextError`].
#[derive(Debug, Clone, Default)]
pub struct MessageContext {
    identity: MessageIdentity,
    properties: HashMap<String, serde_json::Value>,
    body: Vec<u8>,
    parameters: HashMap<String, String>,
    read_only: HashSet<String>,
    finalized: bool,
}

impl MessageContext {
    /// Creates an empty context with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from existing properties.
    #[must_use]
    pub fn from_properties(properties: HashMap<String, serde_json::Value>) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// Sets the identity.
    #[must_use]
    pub fn with_identity(mut self, identity: MessageIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Sets the message body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a template parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Returns the message identity.
    #[must_use]
    pub fn identity(&self) -> &MessageIdentity {
        &self.identity
    }

    /// Borrows a property without cloning it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// Checks if a property exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Removes a property, returning its previous value.
    ///
    /// This is a host operation and ignores read-only locks.
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.properties.remove(key)
    }

    /// Returns the message body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replaces the message body.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Marks a property as read-only for stages.
    pub fn lock_property(&mut self, key: impl Into<String>) {
        self.read_only.insert(key.into());
    }

    /// Finalizes the context. All later property writes are rejected.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    /// Returns true once the host has finalized the context.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Returns a copy of all properties.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        self.properties.clone()
    }

    /// Returns all property keys.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the context has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl PropertyStore for MessageContext {
    fn property(&self, key: &str) -> Option<serde_json::Value> {
        self.properties.get(key).cloned()
    }

    fn set_property(&mut self, key: &str, value: serde_json::Value) -> Result<(), ContextError> {
        if self.finalized {
            return Err(ContextError::Finalized);
        }
        if self.read_only.contains(key) {
            return Err(ContextError::read_only(key));
        }

        self.properties.insert(key.to_string(), value);
        Ok(())
    }

    fn parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }
}
