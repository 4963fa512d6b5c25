//! # Connectflow
//!
//! Pluggable message transformation stages for host message pipelines.
//!
//! A host pipeline hands each in-flight message to a stage together with a
//! resolved configuration. The stage reads its input property, derives a
//! result, and writes exactly one output property, or returns a
//! [`TransformError`](errors::TransformError) and leaves the message untouched.
//!
//! - **Stages**: the [`TransformStage`](stages::TransformStage) contract and the
//!   order status stage
//! - **Contexts**: the [`PropertyStore`](context::PropertyStore) capability and
//!   an in-memory message context
//! - **Observability**: an injected stage logger backed by `tracing`
//! - **Host harness**: fault policies and concurrent dispatch
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use connectflow::prelude::*;
//! use std::sync::Arc;
//!
//! let stage = OrderStatusStage::new(Arc::new(TracingStageLogger));
//! let config = StageConfig::new().with_serialization(SerializationPolicy::Structured);
//!
//! let mut ctx = MessageContext::new().with_property("orderId", serde_json::json!("ORD-42"));
//! stage.execute(&mut ctx, &config)?;
//! // ctx["responseBody"] == {"status":"Order got fulfilled for order id ORD-42"}
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod observability;
pub mod pipeline;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{SerializationPolicy, StageConfig};
    pub use crate::context::{MessageContext, MessageIdentity, PropertyStore};
    pub use crate::core::TransformResult;
    pub use crate::errors::{ConfigError, ContextError, ErrorKind, TransformError};
    pub use crate::observability::{
        init_logging, LogFormat, NoOpStageLogger, StageLogger, TracingStageLogger,
    };
    pub use crate::pipeline::{Disposition, FaultPolicy, StageInvoker};
    pub use crate::stages::{OrderStatusStage, TransformStage};
}
