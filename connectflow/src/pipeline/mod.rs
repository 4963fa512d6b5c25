//! Host-side invocation of stages.
//!
//! This module provides:
//! - A stage invoker binding a stage to its configuration
//! - Fault policies deciding what happens after a failure
//! - Concurrent dispatch over independent messages

#[cfg(test)]
mod integration_tests;
mod invoker;

pub use invoker::{Disposition, FaultPolicy, StageInvoker};
