//! Step payloads emitted by agent executors.

use serde_json::Value;

/// One step of a streamed agent response.
///
/// Executors differ in what a "step" is, so the shape is a tagged variant
/// with a fixed extraction precedence:
///
/// 1. [`Update`](Self::Update) — a state mapping carrying a `messages`
///    sequence; the fragment comes from the last message.
/// 2. [`Sequence`](Self::Sequence) — a bare sequence; the fragment comes
///    from the last element.
/// 3. [`Value`](Self::Value) — anything else; the step itself is the
///    fragment.
///
/// In every case the selected value's `"content"` field is used when
/// present, else its string representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    Update { messages: Vec<Value> },
    Sequence(Vec<Value>),
    Value(Value),
}

impl AgentStep {
    /// Extract the display fragment for this step.
    ///
    /// Returns `None` when an `Update`/`Sequence` step carries no elements;
    /// callers treat that as a malformed stream.
    #[must_use]
    pub fn fragment(&self) -> Option<String> {
        match self {
            Self::Update { messages } => messages.last().map(content_or_repr),
            Self::Sequence(items) => items.last().map(content_or_repr),
            Self::Value(value) => Some(content_or_repr(value)),
        }
    }
}

fn content_or_repr(value: &Value) -> String {
    match value.get("content") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_takes_last_message_content() {
        let step = AgentStep::Update {
            messages: vec![
                json!({"role": "human", "content": "hi"}),
                json!({"role": "ai", "content": "hello"}),
            ],
        };
        assert_eq!(step.fragment().as_deref(), Some("hello"));
    }

    #[test]
    fn sequence_takes_last_element() {
        let step = AgentStep::Sequence(vec![json!("first"), json!("second")]);
        assert_eq!(step.fragment().as_deref(), Some("second"));
    }

    #[test]
    fn bare_value_is_its_own_fragment() {
        let step = AgentStep::Value(json!({"content": "chunk"}));
        assert_eq!(step.fragment().as_deref(), Some("chunk"));
    }

    #[test]
    fn missing_content_falls_back_to_representation() {
        let step = AgentStep::Value(json!({"tool": "translator"}));
        assert_eq!(
            step.fragment().as_deref(),
            Some(r#"{"tool":"translator"}"#)
        );
    }

    #[test]
    fn plain_string_value_is_unquoted() {
        let step = AgentStep::Value(json!("raw text"));
        assert_eq!(step.fragment().as_deref(), Some("raw text"));
    }

    #[test]
    fn non_string_content_uses_its_representation() {
        let step = AgentStep::Value(json!({"content": 42}));
        assert_eq!(step.fragment().as_deref(), Some("42"));
    }

    #[test]
    fn empty_sequences_yield_no_fragment() {
        assert!(AgentStep::Update { messages: vec![] }.fragment().is_none());
        assert!(AgentStep::Sequence(vec![]).fragment().is_none());
    }
}
