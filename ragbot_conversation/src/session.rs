//! Conversation session: bounded history and one streamed turn at a time.

use ragbot_core::{AgentExecutor, ChatMessage, MessageMetadata, RunConfig};
use tracing::{debug, info, warn};

/// Canned reply appended when a turn is abandoned mid-stream.
pub const FALLBACK_REPLY: &str = "Let me try that again...";

const DEFAULT_MAX_HISTORY: usize = 10;

/// Result of one conversation turn.
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// Assistant text recorded for this turn (the fallback reply on
    /// recovered turns).
    pub response: String,
    /// True when the stream failed and the fallback reply was substituted.
    pub recovered: bool,
}

/// A conversation session with bounded message history.
///
/// The session appends a human message per user turn and one AI message per
/// completed agent turn, truncating to `max_history` while always preserving
/// the leading system prompt. `run` is strictly sequential; a session never
/// services two turns at once.
pub struct ConversationSession<E> {
    executor: E,
    thread_id: String,
    max_history: usize,
    messages: Vec<ChatMessage>,
}

impl<E> ConversationSession<E>
where
    E: AgentExecutor,
{
    #[must_use]
    pub fn new(executor: E, thread_id: impl Into<String>) -> Self {
        Self {
            executor,
            thread_id: thread_id.into(),
            max_history: DEFAULT_MAX_HISTORY,
            messages: Vec::new(),
        }
    }

    /// Seed the session with a system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.set_system_prompt(prompt);
        self
    }

    /// Bound the history window. Values below 1 are clamped to 1 so the
    /// system message always survives.
    #[must_use]
    pub const fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = if max_history == 0 { 1 } else { max_history };
        self
    }

    /// Replace the entire message list with a single system message.
    pub fn set_system_prompt(&mut self, prompt: &str) {
        self.messages = vec![ChatMessage::system(prompt)];
    }

    pub fn append_user_message(&mut self, content: &str) {
        self.messages.push(ChatMessage::human(content));
    }

    /// Append an AI message stamped with the generation time; `sources`
    /// defaults to the internal-knowledge sentinel.
    pub fn append_ai_message(&mut self, content: &str, sources: Option<Vec<String>>) {
        self.messages
            .push(ChatMessage::ai(content, MessageMetadata::new(sources)));
    }

    /// Fixed-window eviction: keep the first message (assumed system prompt)
    /// plus the most recent `max_history - 1`, discarding the middle.
    pub fn truncate_history(&mut self) {
        if self.messages.len() > self.max_history {
            let tail_start = self.messages.len() - (self.max_history - 1);
            debug!(
                "Truncating history: {} -> {} messages",
                self.messages.len(),
                self.max_history
            );
            let mut kept = Vec::with_capacity(self.max_history);
            kept.push(self.messages[0].clone());
            kept.extend_from_slice(&self.messages[tail_start..]);
            self.messages = kept;
        }
    }

    /// Run one turn: append the user message, stream the agent's response
    /// fragments through `emit`, then record the concatenated reply and
    /// truncate.
    ///
    /// Any failure — stream construction, a mid-stream error, a step with no
    /// extractable fragment — abandons the turn: nothing from the failed
    /// stream is persisted and the fixed [`FALLBACK_REPLY`] is appended
    /// instead. This is a degraded-mode substitution, not a retry.
    pub async fn run<F>(&mut self, user_input: &str, mut emit: F) -> TurnResult
    where
        F: FnMut(&str),
    {
        self.append_user_message(user_input);

        info!(
            "Running turn for thread {} ({} messages in history)",
            self.thread_id,
            self.messages.len()
        );

        let config = RunConfig::new(self.thread_id.clone());
        let mut stream = match self.executor.stream(&self.messages, &config).await {
            Ok(stream) => stream,
            Err(e) => return self.recover(&e),
        };

        let mut full_response = String::new();
        while let Some(step) = stream.next().await {
            let step = match step {
                Ok(step) => step,
                Err(e) => return self.recover(&e),
            };
            let Some(fragment) = step.fragment() else {
                return self.recover(&anyhow::anyhow!("step carried no extractable fragment"));
            };
            emit(&fragment);
            full_response.push_str(&fragment);
        }

        self.append_ai_message(&full_response, None);
        self.truncate_history();

        TurnResult {
            response: full_response,
            recovered: false,
        }
    }

    fn recover(&mut self, error: &anyhow::Error) -> TurnResult {
        eprintln!("\n⚠️  Error: {error}");
        warn!("Turn abandoned for thread {}: {error}", self.thread_id);
        self.append_ai_message(FALLBACK_REPLY, None);
        TurnResult {
            response: FALLBACK_REPLY.to_string(),
            recovered: true,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    #[must_use]
    pub const fn max_history(&self) -> usize {
        self.max_history
    }
}
