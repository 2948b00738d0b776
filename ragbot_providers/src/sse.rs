//! Minimal server-sent-events line handling for chat-completions streams.

/// Payload of one SSE line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SsePayload {
    /// A `data:` line carrying a JSON body.
    Data(String),
    /// The `[DONE]` terminator.
    Done,
}

/// Parse a single line of an SSE stream.
///
/// Lines without a `data:` field (comments, blank keep-alives, `event:`
/// fields) yield `None`.
pub(crate) fn parse_sse_line(line: &str) -> Option<SsePayload> {
    let rest = line.trim().strip_prefix("data:")?.trim_start();
    if rest == "[DONE]" {
        return Some(SsePayload::Done);
    }
    if rest.is_empty() {
        None
    } else {
        Some(SsePayload::Data(rest.to_string()))
    }
}

/// Extract the delta text from one streamed chat-completions chunk body.
pub(crate) fn delta_content(data: &str) -> Option<String> {
    let chunk: serde_json::Value = serde_json::from_str(data).ok()?;
    chunk["choices"][0]["delta"]["content"]
        .as_str()
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_lines() {
        assert_eq!(
            parse_sse_line(r#"data: {"x":1}"#),
            Some(SsePayload::Data(r#"{"x":1}"#.to_string()))
        );
    }

    #[test]
    fn recognizes_done_terminator() {
        assert_eq!(parse_sse_line("data: [DONE]"), Some(SsePayload::Done));
    }

    #[test]
    fn ignores_non_data_lines() {
        assert_eq!(parse_sse_line(""), None);
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line("event: ping"), None);
    }

    #[test]
    fn extracts_delta_content() {
        let data = r#"{"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(delta_content(data).as_deref(), Some("Hel"));
    }

    #[test]
    fn role_only_chunks_have_no_content() {
        let data = r#"{"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(delta_content(data), None);
    }
}
