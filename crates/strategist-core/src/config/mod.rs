//! Configuration management

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration (chat + embeddings)
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Web search service configuration
    #[serde(default)]
    pub search_service: SearchServiceConfig,

    /// Strategy store configuration
    #[serde(default)]
    pub store: StoreConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the OpenAI-compatible service for chat completions
    pub url: String,

    /// Model name for chat completions (strategy generation)
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for embeddings service (can be different from chat URL)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions reported by the service
    #[serde(default)]
    pub embedding_dimensions: Option<usize>,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LLMServiceConfig {
    /// Get the embeddings URL (falls back to chat URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("STRATEGIST_LLM_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            model: default_chat_model(),
            embedding_url: std::env::var("STRATEGIST_EMBEDDING_URL").ok(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: std::env::var("STRATEGIST_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok()),
            api_key: std::env::var("STRATEGIST_LLM_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .ok(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Web search service configuration (Tavily-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchServiceConfig {
    /// Base URL of the search provider
    pub url: String,

    /// API key for the search provider
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SearchServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("STRATEGIST_SEARCH_URL")
                .unwrap_or_else(|_| "https://api.tavily.com".to_string()),
            api_key: std::env::var("STRATEGIST_SEARCH_API_KEY")
                .or_else(|_| std::env::var("TAVILY_API_KEY"))
                .ok(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Strategy store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Candidate pool size for similarity search
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: std::env::var("STRATEGIST_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| crate::store::Database::default_path()),
            candidate_pool: default_candidate_pool(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("STRATEGIST_LLM_MODEL").unwrap_or_else(|_| "gpt-4.1-mini".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("STRATEGIST_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "text-embedding-3-small".to_string())
}

fn default_timeout() -> u64 {
    30
}

fn default_candidate_pool() -> usize {
    50
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}
