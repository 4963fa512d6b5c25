//! The property store capability a host hands to a stage.

use crate::errors::ContextError;

/// Property access a host exposes to a stage for one invocation.
///
/// Implementations are owned by the host. A stage borrows one mutably for the
/// duration of a single `execute` call and never keeps it afterwards.
#[cfg_attr(test, mockall::automock)]
pub trait PropertyStore {
    /// Returns a copy of the property stored under `key`.
    fn property(&self, key: &str) -> Option<serde_json::Value>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `ContextError` when the host refuses the write.
    fn set_property(&mut self, key: &str, value: serde_json::Value) -> Result<(), ContextError>;

    /// Returns a host-resolved template parameter.
    fn parameter(&self, name: &str) -> Option<String>;
}
