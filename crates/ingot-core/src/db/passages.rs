//! Passage upsert and retrieval
//!
//! One `upsert_passages` call is one transaction: either every record in
//! the run persists or none do. `chunk_id` is the sole conflict key and is
//! never altered by an update.

use super::Database;
use crate::error::{IngotError, Result};
use crate::record::{PassageMetadata, PassageRecord};
use chrono::Utc;
use rusqlite::params;

/// A passage as read back from the store
#[derive(Debug, Clone)]
pub struct StoredPassage {
    pub chunk_id: String,
    pub title: String,
    pub url: Option<String>,
    pub content: String,
    pub metadata: PassageMetadata,
    pub embedding: Option<Vec<f32>>,
    pub updated_at: String,
}

/// Aggregate store counters for status reporting
#[derive(Debug, Clone, Default)]
pub struct StoreStatus {
    pub passages: usize,
    pub embedded: usize,
    pub last_updated_at: Option<String>,
}

/// Serialize an embedding as little-endian f32 bytes
pub fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for value in embedding {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Deserialize little-endian f32 bytes back into an embedding
pub fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

impl Database {
    /// Insert or update every passage in one transaction
    ///
    /// Any single failure rolls the whole batch back and surfaces the
    /// underlying storage error.
    pub fn upsert_passages(&self, records: &[PassageRecord]) -> Result<usize> {
        let now = Utc::now().to_rfc3339();

        self.conn.execute("BEGIN IMMEDIATE", [])?;
        let result = (|| {
            for record in records {
                let metadata_json = serde_json::to_string(&record.metadata)?;
                let embedding_bytes = record.embedding.as_deref().map(embedding_to_bytes);

                self.conn.execute(
                    "INSERT INTO passages (chunk_id, title, url, content, metadata, embedding, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     ON CONFLICT(chunk_id) DO UPDATE SET
                        title = excluded.title,
                        url = excluded.url,
                        content = excluded.content,
                        metadata = excluded.metadata,
                        embedding = excluded.embedding,
                        updated_at = excluded.updated_at",
                    params![
                        record.chunk_id,
                        record.title,
                        record.url,
                        record.content,
                        metadata_json,
                        embedding_bytes,
                        now
                    ],
                )?;
            }
            Ok(records.len())
        })();

        if result.is_ok() {
            self.conn.execute("COMMIT", [])?;
        } else {
            let _ = self.conn.execute("ROLLBACK", []);
        }
        result
    }

    /// Fetch one passage by chunk id
    pub fn get_passage(&self, chunk_id: &str) -> Result<Option<StoredPassage>> {
        let result = self.conn.query_row(
            "SELECT chunk_id, title, url, content, metadata, embedding, updated_at
             FROM passages WHERE chunk_id = ?1",
            params![chunk_id],
            |row| {
                let metadata_json: String = row.get(4)?;
                let embedding_bytes: Option<Vec<u8>> = row.get(5)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, String>(3)?,
                    metadata_json,
                    embedding_bytes,
                    row.get::<_, String>(6)?,
                ))
            },
        );

        match result {
            Ok((chunk_id, title, url, content, metadata_json, embedding_bytes, updated_at)) => {
                let metadata: PassageMetadata = serde_json::from_str(&metadata_json)?;
                Ok(Some(StoredPassage {
                    chunk_id,
                    title,
                    url,
                    content,
                    metadata,
                    embedding: embedding_bytes.as_deref().map(bytes_to_embedding),
                    updated_at,
                }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(IngotError::Database(e)),
        }
    }

    /// Number of stored passages
    pub fn count_passages(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM passages", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Aggregate counters for status reporting
    pub fn status(&self) -> Result<StoreStatus> {
        let (passages, embedded): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COUNT(embedding) FROM passages",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        let last_updated_at: Option<String> = self
            .conn
            .query_row("SELECT MAX(updated_at) FROM passages", [], |row| row.get(0))?;

        Ok(StoreStatus {
            passages: passages as usize,
            embedded: embedded as usize,
            last_updated_at,
        })
    }
}
