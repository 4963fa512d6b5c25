//! Testing utilities for connectflow stages.
//!
//! This module provides:
//! - A harness that runs a stage with a collecting logger
//! - Assertions over message contexts

mod assertions;
mod fixtures;

pub use assertions::{
    assert_only_property_changed, assert_property_absent, assert_property_eq, assert_status,
};
pub use fixtures::{HarnessRun, StageHarness};
