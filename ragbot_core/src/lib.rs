#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod agent;
pub mod stream;

pub use agent::{AgentExecutor, AgentStep, MemorySaver, ReactAgent, RunConfig, StepStream};
pub use stream::{StreamEvent, StreamHandle};

/// Source tag recorded on AI messages produced without retrieval context.
///
/// Copied into each message's metadata rather than shared, so one message's
/// source list can never alias another's.
pub const INTERNAL_KNOWLEDGE: &str = "internal_knowledge";

/// Default system prompt used when no configuration overrides it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Ai,
}

/// Metadata attached to AI messages: when the reply was generated and which
/// sources backed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageMetadata {
    pub timestamp: DateTime<Utc>,
    pub sources: Vec<String>,
}

impl MessageMetadata {
    /// Stamp the current time; `sources` falls back to the
    /// [`INTERNAL_KNOWLEDGE`] sentinel when none are supplied.
    #[must_use]
    pub fn new(sources: Option<Vec<String>>) -> Self {
        Self {
            timestamp: Utc::now(),
            sources: sources.unwrap_or_else(|| vec![INTERNAL_KNOWLEDGE.to_string()]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            metadata: None,
        }
    }

    #[must_use]
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
            metadata: None,
        }
    }

    #[must_use]
    pub fn ai(content: impl Into<String>, metadata: MessageMetadata) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
            metadata: Some(metadata),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse>;

    /// Streaming variant of [`chat`](Self::chat).
    ///
    /// The default implementation performs a blocking completion and wraps it
    /// in a single `Completed` event, so non-streaming providers satisfy the
    /// contract unchanged.
    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> anyhow::Result<StreamHandle> {
        let response = self.chat(messages, model).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let _ = tx.send(StreamEvent::Completed(response.content)).await;
        Ok(StreamHandle::new(rx))
    }

    fn default_model(&self) -> &str;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ai_metadata_defaults_to_internal_knowledge() {
        let metadata = MessageMetadata::new(None);
        assert_eq!(metadata.sources, vec![INTERNAL_KNOWLEDGE.to_string()]);
    }

    #[test]
    fn ai_metadata_keeps_explicit_sources() {
        let metadata = MessageMetadata::new(Some(vec!["report.pdf".to_string()]));
        assert_eq!(metadata.sources, vec!["report.pdf".to_string()]);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::human("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "human");
        assert!(json.get("metadata").is_none());
    }
}
