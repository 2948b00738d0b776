//! Summarization and image description pipelines.
//!
//! Each pipeline is a prompt + model + chain triple. Construction fails fast
//! when a required API credential is absent; nothing is partially
//! initialized.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use ragbot_core::{ChatMessage, LLMProvider};
use ragbot_providers::{GroqProvider, NvidiaProvider};
use thiserror::Error;
use tracing::info;

pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const NVIDIA_API_KEY_ENV: &str = "NVIDIA_API_KEY";

const TEXT_SUMMARY_TEMPLATE: &str = "\
You are an assistant tasked with summarizing tables and text.
Give a concise summary of the table or text.
Respond only with the summary, no additional comment.

Table or text chunk: {element}";

const IMAGE_DESCRIPTION_PROMPT: &str = "\
Describe the image in detail. Be specific about graphs, charts and any \
numbers that appear.";

const BATCH_CONCURRENCY: usize = 3;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("summarization request failed: {0}")]
    Request(#[from] anyhow::Error),
}

/// Credentials for the two model endpoints.
#[derive(Debug, Clone, Default)]
pub struct SummarizerConfig {
    pub groq_api_key: Option<String>,
    pub nvidia_api_key: Option<String>,
}

impl SummarizerConfig {
    /// Read both keys from the environment; empty values count as absent.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |var: &str| std::env::var(var).ok().filter(|k| !k.is_empty());
        Self {
            groq_api_key: read(GROQ_API_KEY_ENV),
            nvidia_api_key: read(NVIDIA_API_KEY_ENV),
        }
    }
}

/// A prompt with `{var}` placeholders.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    #[must_use]
    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    #[must_use]
    pub fn format(&self, var: &str, value: &str) -> String {
        self.template.replace(&format!("{{{var}}}"), value)
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// prompt | model | string-output composition for text summarization.
pub struct SummarizeChain {
    prompt: PromptTemplate,
    provider: Arc<GroqProvider>,
    model: String,
}

impl SummarizeChain {
    #[must_use]
    pub fn new(prompt: PromptTemplate, provider: Arc<GroqProvider>, model: String) -> Self {
        Self {
            prompt,
            provider,
            model,
        }
    }

    pub async fn invoke(&self, element: &str) -> Result<String, SummarizeError> {
        let rendered = self.prompt.format("element", element);
        let messages = [ChatMessage::human(rendered)];
        let response = self.provider.chat(&messages, &self.model).await?;
        Ok(response.content.trim().to_string())
    }

    /// Summarize a batch with bounded concurrency, preserving input order.
    pub async fn batch(&self, elements: &[String]) -> Result<Vec<String>, SummarizeError> {
        info!("Summarizing {} elements", elements.len());
        stream::iter(elements)
            .map(|element| self.invoke(element))
            .buffered(BATCH_CONCURRENCY)
            .try_collect()
            .await
    }
}

/// prompt | vision-model composition for image description.
pub struct ImageChain {
    prompt: PromptTemplate,
    provider: Arc<NvidiaProvider>,
    model: String,
}

impl ImageChain {
    #[must_use]
    pub fn new(prompt: PromptTemplate, provider: Arc<NvidiaProvider>, model: String) -> Self {
        Self {
            prompt,
            provider,
            model,
        }
    }

    pub async fn invoke(&self, image_base64: &str) -> Result<String, SummarizeError> {
        let description = self
            .provider
            .describe_image(self.prompt.template(), image_base64, &self.model)
            .await?;
        Ok(description.trim().to_string())
    }

    pub async fn batch(&self, images: &[String]) -> Result<Vec<String>, SummarizeError> {
        info!("Describing {} images", images.len());
        stream::iter(images)
            .map(|image| self.invoke(image))
            .buffered(BATCH_CONCURRENCY)
            .try_collect()
            .await
    }
}

/// Text summarizer and image describer.
///
/// Exposes the prompt/model/chain triple of each pipeline so callers can
/// compose them independently.
pub struct Summarizer {
    pub text_prompt: PromptTemplate,
    pub text_model: Arc<GroqProvider>,
    pub summarize_chain: SummarizeChain,
    pub image_prompt: PromptTemplate,
    pub image_model: Arc<NvidiaProvider>,
    pub image_chain: ImageChain,
}

impl Summarizer {
    /// Build both pipelines, failing on the first missing credential.
    pub fn new(config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        let groq_key = config
            .groq_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(SummarizeError::MissingCredential(GROQ_API_KEY_ENV))?;
        let nvidia_key = config
            .nvidia_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(SummarizeError::MissingCredential(NVIDIA_API_KEY_ENV))?;

        let text_model = Arc::new(GroqProvider::new(groq_key));
        let text_prompt = PromptTemplate::from_template(TEXT_SUMMARY_TEMPLATE);
        let summarize_chain = SummarizeChain::new(
            text_prompt.clone(),
            Arc::clone(&text_model),
            text_model.default_model().to_string(),
        );

        let image_model = Arc::new(NvidiaProvider::new(nvidia_key));
        let image_prompt = PromptTemplate::from_template(IMAGE_DESCRIPTION_PROMPT);
        let image_chain = ImageChain::new(
            image_prompt.clone(),
            Arc::clone(&image_model),
            image_model.default_model().to_string(),
        );

        Ok(Self {
            text_prompt,
            text_model,
            summarize_chain,
            image_prompt,
            image_model,
            image_chain,
        })
    }

    pub fn from_env() -> Result<Self, SummarizeError> {
        Self::new(&SummarizerConfig::from_env())
    }

    pub async fn summarize_texts(&self, texts: &[String]) -> Result<Vec<String>, SummarizeError> {
        self.summarize_chain.batch(texts).await
    }

    pub async fn describe_images(&self, images: &[String]) -> Result<Vec<String>, SummarizeError> {
        self.image_chain.batch(images).await
    }
}
