//! In-memory checkpointing keyed by thread id.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::ChatMessage;

/// In-memory snapshot store for conversation threads.
///
/// Each completed turn overwrites the snapshot for its thread id. Nothing is
/// persisted; the store lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemorySaver {
    threads: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl MemorySaver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the snapshot for `thread_id`.
    pub fn save(&self, thread_id: &str, messages: &[ChatMessage]) {
        if let Ok(mut threads) = self.threads.lock() {
            debug!("Checkpointing {} messages for thread {thread_id}", messages.len());
            threads.insert(thread_id.to_string(), messages.to_vec());
        }
    }

    /// Latest snapshot for `thread_id`, if one was saved.
    #[must_use]
    pub fn load(&self, thread_id: &str) -> Option<Vec<ChatMessage>> {
        self.threads.lock().ok()?.get(thread_id).cloned()
    }

    #[must_use]
    pub fn thread_count(&self) -> usize {
        self.threads.lock().map(|t| t.len()).unwrap_or(0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let saver = MemorySaver::new();
        let messages = vec![ChatMessage::system("prompt"), ChatMessage::human("hi")];

        saver.save("aaff", &messages);

        let loaded = saver.load("aaff").expect("snapshot should exist");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].content, "hi");
        assert_eq!(saver.thread_count(), 1);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let saver = MemorySaver::new();
        saver.save("t", &[ChatMessage::human("one")]);
        saver.save("t", &[ChatMessage::human("one"), ChatMessage::human("two")]);

        let loaded = saver.load("t").expect("snapshot should exist");
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn unknown_thread_loads_nothing() {
        assert!(MemorySaver::new().load("missing").is_none());
    }
}
