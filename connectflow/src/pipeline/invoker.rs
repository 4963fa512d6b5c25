//! Host-side invocation of a transform stage.
//!
//! The stage itself only transforms. Deciding what happens to a message
//! after a failure belongs to the host, modelled here by [`FaultPolicy`].

use crate::config::StageConfig;
use crate::context::{MessageContext, PropertyStore};
use crate::errors::{ConfigError, TransformError};
use crate::stages::TransformStage;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// What the host does with a message whose stage failed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Fault the message and hand the error back to the caller (default).
    #[default]
    Fault,
    /// Write the error dictionary into the named property and route the
    /// message to the error path.
    ErrorProperty(String),
}

/// Outcome of one invocation, as seen by the host.
#[derive(Debug)]
pub enum Disposition {
    /// The stage succeeded.
    Completed,
    /// The stage failed and the message is faulted.
    Faulted(TransformError),
    /// The stage failed and the error was recorded on the message.
    RoutedToErrorPath(TransformError),
}

impl Disposition {
    /// Returns true if the stage succeeded.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the stage error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&TransformError> {
        match self {
            Self::Completed => None,
            Self::Faulted(err) | Self::RoutedToErrorPath(err) => Some(err),
        }
    }
}

/// Binds a stage to its resolved configuration and fault policy.
#[derive(Debug)]
pub struct StageInvoker {
    stage: Arc<dyn TransformStage>,
    config: StageConfig,
    fault_policy: FaultPolicy,
}

impl StageInvoker {
    /// Creates a new invoker after validating `config`.
    pub fn new(stage: Arc<dyn TransformStage>, config: StageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            stage,
            config,
            fault_policy: FaultPolicy::default(),
        })
    }

    /// Sets the fault policy.
    #[must_use]
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    /// Returns the bound stage.
    #[must_use]
    pub fn stage(&self) -> &Arc<dyn TransformStage> {
        &self.stage
    }

    /// Returns the stage configuration.
    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Returns the fault policy.
    #[must_use]
    pub fn fault_policy(&self) -> &FaultPolicy {
        &self.fault_policy
    }

    /// Runs the stage on one message and applies the fault policy.
    pub fn invoke(&self, ctx: &mut MessageContext) -> Disposition {
        let span = tracing::info_span!(
            "stage_invoke",
            stage = %self.stage.name(),
            message_id = %ctx.identity().message_id,
        );
        let _enter = span.enter();

        let err = match self.stage.execute(ctx, &self.config) {
            Ok(()) => {
                debug!("Stage completed");
                return Disposition::Completed;
            }
            Err(err) => err,
        };

        match &self.fault_policy {
            FaultPolicy::Fault => {
                warn!(kind = %err.kind(), error = %err, "Message faulted");
                Disposition::Faulted(err)
            }
            FaultPolicy::ErrorProperty(property) => {
                let payload: serde_json::Map<String, serde_json::Value> =
                    err.to_dict().into_iter().collect();

                match ctx.set_property(property, serde_json::Value::Object(payload)) {
                    Ok(()) => {
                        warn!(kind = %err.kind(), property = %property, "Message routed to error path");
                        Disposition::RoutedToErrorPath(err)
                    }
                    Err(write_err) => {
                        warn!(
                            kind = %err.kind(),
                            error = %write_err,
                            "Could not record error on message, faulting"
                        );
                        Disposition::Faulted(err)
                    }
                }
            }
        }
    }

    /// Invokes the stage on every context concurrently.
    ///
    /// Each context runs on its own blocking task. Results come back in
    /// input order.
    ///
    /// # Errors
    ///
    /// Fails if a worker task could not be joined.
    pub async fn dispatch_all(
        self: &Arc<Self>,
        contexts: Vec<MessageContext>,
    ) -> anyhow::Result<Vec<(MessageContext, Disposition)>> {
        let total = contexts.len();
        let mut tasks: FuturesUnordered<tokio::task::JoinHandle<(usize, MessageContext, Disposition)>> =
            FuturesUnordered::new();

        for (index, mut ctx) in contexts.into_iter().enumerate() {
            let invoker = Arc::clone(self);
            tasks.push(tokio::task::spawn_blocking(move || {
                let disposition = invoker.invoke(&mut ctx);
                (index, ctx, disposition)
            }));
        }

        let mut slots: Vec<Option<(MessageContext, Disposition)>> =
            std::iter::repeat_with(|| None).take(total).collect();

        while let Some(joined) = tasks.next().await {
            let (index, ctx, disposition) =
                joined.map_err(|e| anyhow::anyhow!("dispatch task failed: {e}"))?;
            slots[index] = Some((ctx, disposition));
        }

        Ok(slots.into_iter().flatten().collect())
    }
}
