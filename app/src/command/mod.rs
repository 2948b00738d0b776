//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate stateless strategy type with its own input,
//! dispatched statically from `main` — no boxing, no runtime casting.

use ragbot_config::Config;
use ragbot_rag::chunking::ChunkerConfig;
use ragbot_rag::summarize::{GROQ_API_KEY_ENV, NVIDIA_API_KEY_ENV, SummarizerConfig};

mod chat;
mod chunk;
mod info;
mod init;
mod summarize;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use chunk::{ChunkInput, ChunkStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use summarize::{SummarizeInput, SummarizeStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via an associated type, so
/// parameters stay type-safe without boxing. Calls are monomorphized at
/// compile time.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Groq API key from config file or environment.
pub(crate) fn resolve_groq_key(config: &Config) -> anyhow::Result<String> {
    config.providers.groq.resolve_key(GROQ_API_KEY_ENV).ok_or_else(|| {
        anyhow::anyhow!(
            "No Groq API key configured. Set providers.groq.api_key or export {GROQ_API_KEY_ENV}."
        )
    })
}

/// Chunker config from the config file, or defaults when no config exists.
pub(crate) fn load_chunker_config() -> ChunkerConfig {
    Config::load().map_or_else(|_| ChunkerConfig::default(), |c| c.chunking)
}

/// Summarizer credentials from the config file plus environment fallback.
pub(crate) fn load_summarizer_config() -> SummarizerConfig {
    Config::load().map_or_else(
        |_| SummarizerConfig::from_env(),
        |config| SummarizerConfig {
            groq_api_key: config.providers.groq.resolve_key(GROQ_API_KEY_ENV),
            nvidia_api_key: config.providers.nvidia.resolve_key(NVIDIA_API_KEY_ENV),
        },
    )
}
