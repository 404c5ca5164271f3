//! Configuration management

use crate::error::{IngotError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Object store layout
    #[serde(default)]
    pub store: StoreConfig,

    /// Chunking parameters
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding service configuration
    #[serde(default)]
    pub embedding: EmbeddingServiceConfig,

    /// Reranking service URL (optional collaborator)
    #[serde(default)]
    pub rerank_url: Option<String>,

    /// Generation service URL (optional collaborator)
    #[serde(default)]
    pub generate_url: Option<String>,

    /// Override path of the SQLite passage store
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

/// Object store layout: where raw documents live and where artifacts go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root of the object store (a directory for the filesystem backend)
    pub root: String,

    /// Prefix of raw input documents
    #[serde(default = "default_raw_prefix")]
    pub raw_prefix: String,

    /// Prefix for the chunked JSONL artifact
    #[serde(default = "default_out_prefix")]
    pub out_prefix: String,

    /// Optional base URL recorded on each passage (url = base_url/filename)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: std::env::var("INGOT_STORE_ROOT").unwrap_or_default(),
            raw_prefix: std::env::var("INGOT_RAW_PREFIX").unwrap_or_else(|_| default_raw_prefix()),
            out_prefix: std::env::var("INGOT_OUT_PREFIX").unwrap_or_else(|_| default_out_prefix()),
            base_url: std::env::var("INGOT_BASE_URL").ok(),
        }
    }
}

fn default_raw_prefix() -> String {
    "raw/".to_string()
}

fn default_out_prefix() -> String {
    "chunked/".to_string()
}

/// Chunk packing parameters
///
/// These feed the token-estimate packer; changing them shifts chunk
/// boundaries and therefore every downstream chunk id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap_tokens(),
        }
    }
}

fn default_max_tokens() -> usize {
    600
}

fn default_overlap_tokens() -> usize {
    50
}

/// Embedding service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingServiceConfig {
    /// Base URL of the embedding service
    pub url: String,

    /// Texts per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Concurrent in-flight batch requests
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Expected embedding dimensions (verified against service responses)
    #[serde(default)]
    pub dimensions: Option<usize>,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retry attempts for transient failures
    #[serde(default = "default_retries")]
    pub retries: usize,
}

impl Default for EmbeddingServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("INGOT_EMBEDDING_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            batch_size: std::env::var("INGOT_EMBED_BATCH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_batch_size),
            max_concurrent: default_max_concurrent(),
            dimensions: std::env::var("INGOT_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok()),
            api_key: std::env::var("INGOT_API_KEY").ok(),
            timeout_secs: default_timeout(),
            retries: default_retries(),
        }
    }
}

fn default_batch_size() -> usize {
    32
}

fn default_max_concurrent() -> usize {
    4
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> usize {
    3
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

    /// Validate parameters needed before any I/O happens
    pub fn validate(&self) -> Result<()> {
        if self.store.root.is_empty() {
            return Err(IngotError::Config(
                "store.root is not set (or INGOT_STORE_ROOT)".to_string(),
            ));
        }
        if self.chunking.max_tokens == 0 {
            return Err(IngotError::Config(
                "chunking.max_tokens must be positive".to_string(),
            ));
        }
        if self.chunking.overlap_tokens >= self.chunking.max_tokens {
            return Err(IngotError::Config(
                "chunking.overlap_tokens must be smaller than max_tokens".to_string(),
            ));
        }
        Ok(())
    }

    /// Additional validation for stages that call the embedding service
    pub fn validate_embedding(&self) -> Result<()> {
        if self.embedding.url.is_empty() {
            return Err(IngotError::Config(
                "embedding.url is not set (or INGOT_EMBEDDING_URL)".to_string(),
            ));
        }
        if self.embedding.batch_size == 0 {
            return Err(IngotError::Config(
                "embedding.batch_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
