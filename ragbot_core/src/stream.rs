//! Streaming events for provider responses.
//!
//! [`StreamHandle`] bridges a provider's transport-level streaming (e.g. SSE
//! chunks) to consumers as an ordered sequence of [`StreamEvent`]s over an
//! mpsc channel.

use tokio::sync::mpsc;

/// An event in a streaming model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Delta or Completed event.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Delta(s) | Self::Completed(s) => Some(s),
            Self::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Error(_))
    }
}

/// Handle for receiving streaming events from a provider.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> anyhow::Result<String> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => anyhow::bail!("stream failed: {e}"),
            }
        }
        // Channel closed without Completed; return what arrived
        Ok(full_text)
    }
}
