//! External inference service clients
//!
//! The embedding, reranking and generation models are stateless HTTP
//! collaborators; only their JSON request/response contracts matter here.

mod batcher;
mod client;
mod generator;
mod reranker;
mod traits;

pub use batcher::{embed_all, l2_normalize};
pub use client::{EmbeddingClient, HttpEmbedder, EMBED_INSTRUCTION_PREFIX};
pub use generator::{GenerationContext, HttpGenerator};
pub use reranker::{HttpReranker, RerankCandidate};
pub use traits::{Embedder, Generator, Reranker};
