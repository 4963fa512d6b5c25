//! Message contexts handed to stages by a host pipeline.
//!
//! This module provides:
//! - The `PropertyStore` capability stages read from and write to
//! - An in-memory `MessageContext` for hosts and tests
//! - Message identity for log correlation

#[cfg(test)]
mod context_tests;
mod identity;
mod message;
mod store;

pub use identity::MessageIdentity;
pub use message::MessageContext;
pub use store::PropertyStore;

#[cfg(test)]
pub use store::MockPropertyStore;
