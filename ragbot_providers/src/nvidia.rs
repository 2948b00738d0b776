use async_trait::async_trait;
use ragbot_core::{ChatMessage, LLMProvider, LLMResponse};
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::{parse_chat_response, wire_messages};

const DEFAULT_MODEL: &str = "meta/llama-3.2-90b-vision-instruct";

/// Client for the NVIDIA integrate endpoint (OpenAI-compatible wire shape).
///
/// Besides plain chat it exposes [`describe_image`](Self::describe_image),
/// which sends the image as a base64 `image_url` content block.
pub struct NvidiaProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NvidiaProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating NvidiaProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://integrate.api.nvidia.com/v1".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn send(&self, request: &serde_json::Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        parse_chat_response(&response)
    }

    /// Describe a base64-encoded PNG with a vision model.
    pub async fn describe_image(
        &self,
        prompt: &str,
        image_base64: &str,
        model: &str,
    ) -> anyhow::Result<String> {
        let request = json!({
            "model": model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    {
                        "type": "image_url",
                        "image_url": { "url": format!("data:image/png;base64,{image_base64}") }
                    }
                ]
            }],
        });

        info!("Sending image description request to NVIDIA API: model={}", model);

        Ok(self.send(&request).await?.content)
    }
}

#[async_trait]
impl LLMProvider for NvidiaProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": wire_messages(messages),
        });

        info!("Sending request to NVIDIA API: model={}", model);

        self.send(&request).await
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }
}
