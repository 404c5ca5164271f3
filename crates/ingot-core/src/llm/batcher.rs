//! Order-preserving batched embedding with L2 normalization

use crate::error::{IngotError, Result};
use crate::llm::Embedder;
use crate::record::PassageRecord;
use futures::stream::{self, StreamExt};

const NORM_EPSILON: f32 = 1e-12;

/// Scale a vector to unit Euclidean length
///
/// `v / (||v|| + eps)` so downstream cosine similarity reduces to a dot
/// product. Degenerate (all-zero) vectors stay near zero rather than
/// producing NaN.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    let scale = 1.0 / (norm + NORM_EPSILON);
    for x in vector.iter_mut() {
        *x *= scale;
    }
}

/// Populate the embedding field of every record
///
/// Contents are grouped into `batch_size` batches, dispatched to the
/// embedder with at most `max_concurrent` requests in flight, reassembled
/// in submission order, then each vector is L2-normalized independently.
pub async fn embed_all(
    records: &mut [PassageRecord],
    embedder: &dyn Embedder,
    batch_size: usize,
    max_concurrent: usize,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let texts: Vec<String> = records.iter().map(|r| r.content.clone()).collect();
    let batches: Vec<&[String]> = texts.chunks(batch_size.max(1)).collect();
    let total_batches = batches.len();

    tracing::info!(
        passages = records.len(),
        batches = total_batches,
        concurrent = max_concurrent,
        "embedding passages"
    );

    let mut results: Vec<(usize, Result<Vec<Vec<f32>>>)> = stream::iter(batches)
        .enumerate()
        .map(|(idx, batch)| async move {
            tracing::debug!("embedding batch {}/{}", idx + 1, total_batches);
            (idx, embedder.embed_batch(batch).await)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    // Reassemble in submission order before assignment
    results.sort_by_key(|(idx, _)| *idx);

    let mut embeddings = Vec::with_capacity(records.len());
    for (_, result) in results {
        embeddings.extend(result?);
    }

    if embeddings.len() != records.len() {
        return Err(IngotError::ExternalService(format!(
            "embedding count mismatch: {} passages, {} vectors",
            records.len(),
            embeddings.len()
        )));
    }

    for (record, mut embedding) in records.iter_mut().zip(embeddings.into_iter()) {
        l2_normalize(&mut embedding);
        record.embedding = Some(embedding);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{PassageMetadata, PassageRecord};
    use async_trait::async_trait;

    /// Deterministic fake: vector [len, 1.0, index-within-batch]
    struct MockEmbedder;

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .enumerate()
                .map(|(i, t)| vec![t.len() as f32, 1.0, i as f32])
                .collect())
        }

        fn dimensions(&self) -> Option<usize> {
            Some(3)
        }
    }

    fn record(content: &str) -> PassageRecord {
        PassageRecord {
            chunk_id: "id-0000".to_string(),
            title: "T".to_string(),
            url: None,
            content: content.to_string(),
            section: "doc".to_string(),
            doc_type: "doc".to_string(),
            metadata: PassageMetadata {
                source_key: "raw/x.txt".to_string(),
                language: "en".to_string(),
                doc_type: "doc".to_string(),
                chunk_index: 0,
                chunk_count: 1,
                updated_at: String::new(),
            },
            embedding: None,
        }
    }

    #[test]
    fn test_l2_normalize_unit_norm() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_l2_normalize_zero_vector_no_nan() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert!(v.iter().all(|x| x.is_finite()));
    }

    #[tokio::test]
    async fn test_embed_all_three_unit_vectors_in_order() {
        let mut records = vec![record("aa"), record("bbbb"), record("cccccc")];
        embed_all(&mut records, &MockEmbedder, 32, 4).await.unwrap();

        assert_eq!(records.len(), 3);
        for (i, rec) in records.iter().enumerate() {
            let emb = rec.embedding.as_ref().expect("embedding populated");
            let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5, "vector {i} not unit norm");
        }

        // order preserved: first component scales with content length
        let first = records[0].embedding.as_ref().unwrap()[0];
        let last = records[2].embedding.as_ref().unwrap()[0];
        assert!(first < last);
    }

    #[tokio::test]
    async fn test_embed_all_small_batches_preserve_order() {
        let mut records: Vec<PassageRecord> =
            (1..=9).map(|i| record(&"x".repeat(i))).collect();
        embed_all(&mut records, &MockEmbedder, 2, 3).await.unwrap();

        // pre-normalization first component is the content length; after
        // normalization relative ordering of length vs the constant 1.0
        // component still encodes input order within each vector
        for (i, rec) in records.iter().enumerate() {
            let emb = rec.embedding.as_ref().unwrap();
            let ratio = emb[0] / emb[1];
            assert!((ratio - (i as f32 + 1.0)).abs() < 1e-3);
        }
    }
}
