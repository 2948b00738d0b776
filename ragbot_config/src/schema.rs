use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Reuse the chunker's own config shape to avoid duplication
use ragbot_rag::chunking::ChunkerConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub agents: AgentsConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub chunking: ChunkerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentsConfig {
    pub defaults: AgentDefaults,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentDefaults {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub groq: ProviderConfig,
    #[serde(default)]
    pub nvidia: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// Key from the config file, else from `env_var`.
    ///
    /// Empty strings count as absent so a templated-but-unfilled config does
    /// not shadow a real environment key.
    #[must_use]
    pub fn resolve_key(&self, env_var: &str) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(env_var).ok().filter(|k| !k.is_empty()))
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("ragbot");

        let config_path = config_dir.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'ragbot init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("ragbot");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "agents": {
    "defaults": {
      "model": "llama-3.3-70b-versatile",
      "max_tokens": 1024,
      "temperature": 0.7,
      "history_limit": 10
    }
  },
  "providers": {
    "groq": {
      "api_key": ""
    },
    "nvidia": {
      "api_key": ""
    }
  },
  "chunking": {
    "output_path": "./content/"
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your Groq API key (or export GROQ_API_KEY)");
        println!("   2. Add your NVIDIA API key for image description (or export NVIDIA_API_KEY)");
        println!("   3. Run 'ragbot chat' to start a conversation");
        println!();
        println!("🔧 Configuration options:");
        println!("   - model: chat model to use (llama-3.3-70b-versatile, etc.)");
        println!("   - history_limit: number of messages kept in conversation context");
        println!("   - chunking.output_path: directory resolved against relative PDF names");
        println!();
        Ok(())
    }
}
