//! HTTP providers for OpenAI-compatible chat endpoints.

mod groq;
mod nvidia;
mod sse;

pub use groq::GroqProvider;
pub use nvidia::NvidiaProvider;

use ragbot_core::{ChatMessage, LLMResponse, Role, Usage};
use serde_json::{Value, json};

/// Map internal roles onto the OpenAI-compatible wire names.
const fn wire_role(role: &Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::Human => "user",
        Role::Ai => "assistant",
    }
}

pub(crate) fn wire_messages(messages: &[ChatMessage]) -> Vec<Value> {
    messages
        .iter()
        .map(|m| json!({ "role": wire_role(&m.role), "content": m.content }))
        .collect()
}

/// Extract content and usage from a chat-completions response body.
pub(crate) fn parse_chat_response(response: &Value) -> anyhow::Result<LLMResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .to_string();

    let usage = response["usage"].as_object().map(|u| Usage {
        prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
            .unwrap_or(0),
        total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
    });

    Ok(LLMResponse { content, usage })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roles_match_openai_names() {
        let messages = vec![
            ChatMessage::system("s"),
            ChatMessage::human("h"),
            ChatMessage::ai("a", ragbot_core::MessageMetadata::new(None)),
        ];
        let wire = wire_messages(&messages);
        assert_eq!(wire[0]["role"], "system");
        assert_eq!(wire[1]["role"], "user");
        assert_eq!(wire[2]["role"], "assistant");
    }

    #[test]
    fn parses_content_and_usage() {
        let body = json!({
            "choices": [{"message": {"content": "hello"}}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 5, "total_tokens": 8}
        });
        let response = parse_chat_response(&body).expect("valid body");
        assert_eq!(response.content, "hello");
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(8));
    }

    #[test]
    fn missing_content_is_an_error() {
        let body = json!({"choices": []});
        assert!(parse_chat_response(&body).is_err());
    }
}
