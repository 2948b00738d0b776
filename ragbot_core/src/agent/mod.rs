//! Agent executor contract and the bundled provider-backed implementation.
//!
//! The conversation layer only depends on [`AgentExecutor`]: given the full
//! message history and a run configuration, an executor yields an ordered
//! stream of [`AgentStep`]s. [`ReactAgent`] is the in-tree implementation;
//! any third-party agent runtime can stand in behind the same trait.

mod checkpoint;
mod react;
mod step;

pub use checkpoint::MemorySaver;
pub use react::ReactAgent;
pub use step::AgentStep;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::ChatMessage;

/// Per-run configuration handed to the executor.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Opaque identifier correlating this conversation with any external
    /// checkpointing state.
    pub thread_id: String,
}

impl RunConfig {
    #[must_use]
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new("default")
    }
}

/// Ordered stream of agent steps for one turn.
///
/// Steps arrive in order; an `Err` item is a mid-stream failure and channel
/// close is stream end.
pub struct StepStream {
    pub receiver: mpsc::Receiver<anyhow::Result<AgentStep>>,
}

impl StepStream {
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<anyhow::Result<AgentStep>>) -> Self {
        Self { receiver }
    }

    pub async fn next(&mut self) -> Option<anyhow::Result<AgentStep>> {
        self.receiver.recv().await
    }
}

#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Start one turn over the given history and return its step stream.
    async fn stream(
        &self,
        messages: &[ChatMessage],
        config: &RunConfig,
    ) -> anyhow::Result<StepStream>;
}

#[async_trait]
impl<T> AgentExecutor for std::sync::Arc<T>
where
    T: AgentExecutor + ?Sized,
{
    async fn stream(
        &self,
        messages: &[ChatMessage],
        config: &RunConfig,
    ) -> anyhow::Result<StepStream> {
        (**self).stream(messages, config).await
    }
}
