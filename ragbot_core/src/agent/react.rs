//! Provider-backed react-style agent executor.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::stream::StreamEvent;
use crate::{ChatMessage, LLMProvider, MessageMetadata};

use super::{AgentExecutor, AgentStep, MemorySaver, RunConfig, StepStream};

/// Agent executor that forwards the conversation to a chat model and streams
/// the reply back as one step per response fragment.
///
/// After a completed turn the post-turn history is snapshotted into the
/// attached [`MemorySaver`] under the run's thread id.
pub struct ReactAgent<P> {
    provider: P,
    model: String,
    checkpointer: Arc<MemorySaver>,
}

impl<P> ReactAgent<P>
where
    P: LLMProvider,
{
    #[must_use]
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            checkpointer: Arc::new(MemorySaver::new()),
        }
    }

    /// Share an externally owned checkpointer.
    #[must_use]
    pub fn with_checkpointer(mut self, checkpointer: Arc<MemorySaver>) -> Self {
        self.checkpointer = checkpointer;
        self
    }

    #[must_use]
    pub fn checkpointer(&self) -> Arc<MemorySaver> {
        Arc::clone(&self.checkpointer)
    }
}

#[async_trait]
impl<P> AgentExecutor for ReactAgent<P>
where
    P: LLMProvider + 'static,
{
    async fn stream(
        &self,
        messages: &[ChatMessage],
        config: &RunConfig,
    ) -> anyhow::Result<StepStream> {
        info!(
            "Starting agent turn for thread {} ({} messages)",
            config.thread_id,
            messages.len()
        );

        let mut handle = self.provider.chat_stream(messages, &self.model).await?;

        let (tx, rx) = mpsc::channel(32);
        let checkpointer = Arc::clone(&self.checkpointer);
        let thread_id = config.thread_id.clone();
        let history = messages.to_vec();

        tokio::spawn(async move {
            let mut full = String::new();

            while let Some(event) = handle.receiver.recv().await {
                match event {
                    StreamEvent::Delta(chunk) => {
                        full.push_str(&chunk);
                        let step = AgentStep::Value(json!({ "content": chunk }));
                        if tx.send(Ok(step)).await.is_err() {
                            return;
                        }
                    }
                    StreamEvent::Completed(text) => {
                        // Non-streaming providers deliver the whole reply here.
                        if full.is_empty() && !text.is_empty() {
                            full = text.clone();
                            let step = AgentStep::Value(json!({ "content": text }));
                            if tx.send(Ok(step)).await.is_err() {
                                return;
                            }
                        }
                        break;
                    }
                    StreamEvent::Error(e) => {
                        let _ = tx.send(Err(anyhow::anyhow!(e))).await;
                        return;
                    }
                }
            }

            debug!("Agent turn for thread {thread_id} produced {} chars", full.len());

            let mut snapshot = history;
            snapshot.push(ChatMessage::ai(full, MessageMetadata::new(None)));
            checkpointer.save(&thread_id, &snapshot);
        });

        Ok(StepStream::new(rx))
    }
}
