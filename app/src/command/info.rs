use ragbot_config::Config;
use ragbot_rag::summarize::{GROQ_API_KEY_ENV, NVIDIA_API_KEY_ENV};

/// Strategy for displaying configuration information.
///
/// Outputs masked API keys, agent defaults and chunking settings.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== ragbot Configuration ===\n");

        println!("API Keys:");
        println!(
            "  Groq:   {}",
            mask_key(config.providers.groq.resolve_key(GROQ_API_KEY_ENV).as_deref())
        );
        println!(
            "  NVIDIA: {}",
            mask_key(config.providers.nvidia.resolve_key(NVIDIA_API_KEY_ENV).as_deref())
        );
        println!();

        println!("Agent Defaults:");
        println!("  Model: {}", config.agents.defaults.model);
        println!("  Max Tokens: {}", config.agents.defaults.max_tokens);
        println!("  Temperature: {}", config.agents.defaults.temperature);
        if let Some(limit) = config.agents.defaults.history_limit {
            println!("  History Limit: {limit}");
        }
        if let Some(prompt) = &config.agents.defaults.system_prompt {
            let preview: String = prompt.chars().take(60).collect();
            println!("  System Prompt: {preview}...");
        }
        println!();

        println!("Chunking:");
        println!("  Output Path: {}", config.chunking.output_path);
        println!("  Strategy: {:?}", config.chunking.strategy);
        println!("  Chunking Strategy: {:?}", config.chunking.chunking_strategy);
        println!("  Max Characters: {}", config.chunking.max_characters);

        Ok(())
    }
}

fn mask_key(key: Option<&str>) -> String {
    match key {
        Some(key) if key.len() > 8 => {
            format!("{}...{}", &key[..4], &key[key.len() - 4..])
        }
        Some(_) => "***".to_string(),
        None => "(not set)".to_string(),
    }
}
