//! HTTP client for the external embedding service

use crate::config::EmbeddingServiceConfig;
use crate::error::{IngotError, Result};
use crate::llm::Embedder;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Instruction tag the embedding model expects on every input text
pub const EMBED_INSTRUCTION_PREFIX: &str = "query: ";

/// Low-level client for the embedding service wire protocol:
/// `{texts: [..]}` in, `{embeddings: [[f32]], dim}` out.
pub struct EmbeddingClient {
    http_client: reqwest::Client,
    config: EmbeddingServiceConfig,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
    dim: usize,
}

impl EmbeddingClient {
    /// Create a new client from configuration
    pub fn new(config: EmbeddingServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(IngotError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &EmbeddingServiceConfig {
        &self.config
    }

    /// One embedding request, no retry
    async fn embed_once(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut req = self
            .http_client
            .post(&self.config.url)
            .json(&EmbedRequest { texts });

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // client faults are not retryable; server faults are
            if status.is_client_error() {
                return Err(IngotError::InvalidInput(format!(
                    "embedding service rejected request (HTTP {status}): {body}"
                )));
            }
            return Err(IngotError::ExternalService(format!(
                "embedding service error (HTTP {status}): {body}"
            )));
        }

        let parsed: EmbedResponse = response.json().await?;

        if parsed.embeddings.len() != texts.len() {
            return Err(IngotError::ExternalService(format!(
                "embedding count mismatch: sent {}, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }
        if let Some(expected) = self.config.dimensions {
            if parsed.dim != expected {
                return Err(IngotError::ExternalService(format!(
                    "embedding dimensions mismatch: expected {expected}, got {}",
                    parsed.dim
                )));
            }
        }

        Ok(parsed.embeddings)
    }
}

/// Embedder backed by the external HTTP service
///
/// Adds the instruction prefix and bounded retry with backoff on transient
/// failures; the service is otherwise treated as a pure function of input.
pub struct HttpEmbedder {
    client: EmbeddingClient,
}

impl HttpEmbedder {
    pub fn new(client: EmbeddingClient) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: EmbeddingServiceConfig) -> Result<Self> {
        Ok(Self {
            client: EmbeddingClient::new(config)?,
        })
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let prefixed: Vec<String> = texts
            .iter()
            .map(|t| format!("{EMBED_INSTRUCTION_PREFIX}{t}"))
            .collect();

        let attempts = self.client.config().retries.max(1);
        let mut backoff = Duration::from_millis(500);
        let mut last_err = None;

        for attempt in 0..attempts {
            match self.client.embed_once(&prefixed).await {
                Ok(embeddings) => return Ok(embeddings),
                Err(err @ (IngotError::Http(_) | IngotError::ExternalService(_))) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        attempts,
                        error = %err,
                        "embedding request failed"
                    );
                    last_err = Some(err);
                    if attempt + 1 < attempts {
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or_else(|| {
            IngotError::ExternalService("embedding request failed".to_string())
        }))
    }

    fn dimensions(&self) -> Option<usize> {
        self.client.config().dimensions
    }
}
