//! Core domain types for connectflow.

mod result;

pub use result::TransformResult;
