//! Ingot Core Library
//!
//! Offline ingestion and indexing pipeline for retrieval-augmented QA.
//!
//! # Features
//! - Text extraction from Markdown, HTML, plain text and PDF sources
//! - Deterministic normalization and sentence-aware chunk packing
//! - Stable content-derived chunk identity for idempotent re-ingestion
//! - Batched embedding via an external HTTP service, L2-normalized
//! - Transactional SQLite vector store upsert keyed by chunk id

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod llm;
pub mod record;
pub mod store;

pub use config::{ChunkingConfig, Config, EmbeddingServiceConfig, StoreConfig};
pub use db::Database;
pub use error::{Error, IngotError, Result};
pub use extract::{extract, DocFormat, ExtractOutcome};
pub use ingest::{
    chunk_id, estimate_tokens, normalize, pack_sentences, process_document, run_chunking,
    ChunkStats, PipelineOptions, RegexSegmenter, Segmenter,
};
pub use llm::{
    embed_all, Embedder, EmbeddingClient, GenerationContext, Generator, HttpEmbedder,
    HttpGenerator, HttpReranker, RerankCandidate, Reranker,
};
pub use record::{guess_doc_type, PassageMetadata, PassageRecord};
pub use store::{FsObjectStore, ObjectStore};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "ingot";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "ingot";

/// Default object-store key for the intermediate chunk artifact
pub const DEFAULT_CHUNKS_KEY: &str = "chunked/chunks.jsonl";
