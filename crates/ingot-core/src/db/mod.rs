//! Passage store
//!
//! SQLite-backed persistence keyed by chunk id. Embeddings are stored as
//! little-endian f32 BLOBs; a whole ingestion run commits as one
//! transaction so readers never see a partially-indexed document.

mod passages;
mod schema;

pub use passages::{bytes_to_embedding, embedding_to_bytes, StoredPassage, StoreStatus};
pub use schema::Database;

use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("passages.sqlite")
    }
}
