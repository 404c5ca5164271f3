//! Inference service trait definitions

use crate::error::Result;
use async_trait::async_trait;

use super::generator::GenerationContext;
use super::reranker::RerankCandidate;

/// Embedding generation trait
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embeddings for a batch of texts, order-preserving
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Expected embedding dimensions, if known up front
    fn dimensions(&self) -> Option<usize>;
}

/// Passage reranking trait
#[async_trait]
pub trait Reranker: Send + Sync {
    /// Score candidates against a query and return the top-k, sorted
    /// descending by rerank score
    async fn rerank(
        &self,
        query: &str,
        candidates: Vec<RerankCandidate>,
        top_k: usize,
    ) -> Result<Vec<RerankCandidate>>;
}

/// Answer generation trait
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate an answer grounded in the given contexts
    async fn generate(&self, question: &str, contexts: &[GenerationContext]) -> Result<String>;
}
