//! HTTP client for the passage reranking service

use crate::error::{IngotError, Result};
use crate::llm::Reranker;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A retrieval candidate submitted for reranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub content: String,

    /// Populated by the service on response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerank_score: Option<f32>,
}

/// Reranker backed by the external cross-encoder service
pub struct HttpReranker {
    http_client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    query: &'a str,
    candidates: &'a [RerankCandidate],
    top_k: usize,
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RerankCandidate>,
}

impl HttpReranker {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(IngotError::Http)?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Reranker for HttpReranker {
    async fn rerank(
        &self,
        query: &str,
        candidates: Vec<RerankCandidate>,
        top_k: usize,
    ) -> Result<Vec<RerankCandidate>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let request = RerankRequest {
            query,
            candidates: &candidates,
            top_k,
        };

        let response = self.http_client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(IngotError::ExternalService(format!(
                "rerank service error (HTTP {status}): {body}"
            )));
        }

        let parsed: RerankResponse = response.json().await?;
        Ok(parsed.results)
    }
}
