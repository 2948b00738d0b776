use async_trait::async_trait;
use futures::StreamExt;
use ragbot_core::{ChatMessage, LLMProvider, LLMResponse, StreamEvent, StreamHandle};
use reqwest::Client;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::sse::{SsePayload, delta_content, parse_sse_line};
use crate::{parse_chat_response, wire_messages};

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating GroqProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.groq.com/openai/v1".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl LLMProvider for GroqProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": wire_messages(messages),
        });

        info!("Sending request to Groq API: model={}", model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        parse_chat_response(&response)
    }

    async fn chat_stream(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> anyhow::Result<StreamHandle> {
        let request = json!({
            "model": model,
            "messages": wire_messages(messages),
            "stream": true,
        });

        info!("Opening streaming request to Groq API: model={}", model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut body = response.bytes_stream();
            let mut buffer = String::new();
            let mut full = String::new();

            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&bytes));

                while let Some(pos) = buffer.find('\n') {
                    let line: String = buffer.drain(..=pos).collect();
                    match parse_sse_line(&line) {
                        Some(SsePayload::Done) => {
                            debug!("Groq stream finished ({} chars)", full.len());
                            let _ = tx.send(StreamEvent::Completed(full)).await;
                            return;
                        }
                        Some(SsePayload::Data(data)) => {
                            if let Some(delta) = delta_content(&data) {
                                full.push_str(&delta);
                                if tx.send(StreamEvent::Delta(delta)).await.is_err() {
                                    return;
                                }
                            }
                        }
                        None => {}
                    }
                }
            }

            // Connection closed without [DONE]; flush what arrived
            let _ = tx.send(StreamEvent::Completed(full)).await;
        });

        Ok(StreamHandle::new(rx))
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }
}
