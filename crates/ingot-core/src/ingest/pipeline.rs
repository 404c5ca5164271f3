//! Document pipeline orchestration
//!
//! Drives extract -> normalize -> segment -> pack -> identity per document
//! and assembles the passage records that cross the storage boundary.

use crate::config::{ChunkingConfig, Config};
use crate::error::{IngotError, Result};
use crate::extract::{extract, DocFormat};
use crate::ingest::{chunk_id, normalize, pack_sentences, Segmenter};
use crate::record::{file_name, guess_doc_type, title_from_key, PassageMetadata, PassageRecord};
use crate::store::ObjectStore;
use chrono::Utc;

/// Per-run pipeline options
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub chunking: ChunkingConfig,
    /// Optional base URL recorded on each passage
    pub base_url: Option<String>,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            chunking: config.chunking,
            base_url: config.store.base_url.clone(),
        }
    }
}

/// Counters for one chunking run
#[derive(Debug, Clone, Default)]
pub struct ChunkStats {
    pub documents: usize,
    pub degraded: usize,
    pub empty_documents: usize,
    pub passages: usize,
}

/// Process one source object into its ordered passage records
///
/// The second element flags a degraded extraction. A document that yields
/// zero passages (empty or unreadable source) produces an empty vec; the
/// caller decides whether that matters.
pub fn process_document(
    key: &str,
    bytes: &[u8],
    segmenter: &dyn Segmenter,
    options: &PipelineOptions,
) -> (Vec<PassageRecord>, bool) {
    let format = match DocFormat::from_key(key) {
        Some(format) => format,
        None => DocFormat::Text,
    };

    let outcome = extract(bytes, format);
    let degraded = outcome.is_degraded();
    if let Some(reason) = outcome.reason() {
        tracing::warn!(key, reason, "extraction degraded");
    }

    let text = normalize(outcome.text());
    let sentences = segmenter.segment(&text);
    let parts = pack_sentences(
        &sentences,
        options.chunking.max_tokens,
        options.chunking.overlap_tokens,
    );

    let title = title_from_key(key);
    let url = options
        .base_url
        .as_ref()
        .map(|base| format!("{}/{}", base.trim_end_matches('/'), file_name(key)));
    let doc_type = guess_doc_type(key);
    let updated_at = Utc::now().to_rfc3339();
    let chunk_count = parts.len();

    let records = parts
        .into_iter()
        .enumerate()
        .map(|(index, content)| PassageRecord {
            chunk_id: chunk_id(key, index),
            title: title.clone(),
            url: url.clone(),
            content,
            section: doc_type.to_string(),
            doc_type: doc_type.to_string(),
            metadata: PassageMetadata {
                source_key: key.to_string(),
                language: "en".to_string(),
                doc_type: doc_type.to_string(),
                chunk_index: index,
                chunk_count,
                updated_at: updated_at.clone(),
            },
            embedding: None,
        })
        .collect();

    (records, degraded)
}

/// Run the chunking stage over every eligible object under the raw prefix
///
/// Zero eligible source objects is fatal (nothing to do); a single document
/// yielding zero passages is skipped with a warning.
pub fn run_chunking(
    store: &dyn ObjectStore,
    segmenter: &dyn Segmenter,
    config: &Config,
) -> Result<(Vec<PassageRecord>, ChunkStats)> {
    let keys = store.list(&config.store.raw_prefix)?;
    if keys.is_empty() {
        return Err(IngotError::NothingToProcess(
            config.store.raw_prefix.clone(),
        ));
    }

    let options = PipelineOptions::from_config(config);
    let mut records = Vec::new();
    let mut stats = ChunkStats::default();

    for key in &keys {
        let bytes = store.read(key)?;
        let (passages, degraded) = process_document(key, &bytes, segmenter, &options);
        stats.documents += 1;
        if degraded {
            stats.degraded += 1;
        }

        if passages.is_empty() {
            tracing::warn!(key, "document produced no passages, skipping");
            stats.empty_documents += 1;
            continue;
        }

        tracing::debug!(key, passages = passages.len(), "chunked document");
        stats.passages += passages.len();
        records.extend(passages);
    }

    tracing::info!(
        documents = stats.documents,
        passages = stats.passages,
        degraded = stats.degraded,
        empty = stats.empty_documents,
        "chunking run complete"
    );

    Ok((records, stats))
}
