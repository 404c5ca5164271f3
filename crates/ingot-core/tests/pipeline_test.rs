//! End-to-end pipeline tests: chunk -> embed -> upsert against a
//! filesystem object store, a mock embedder and an in-memory database.

use async_trait::async_trait;
use ingot_core::{
    chunk_id, embed_all, run_chunking, Config, Database, Embedder, FsObjectStore, IngotError,
    ObjectStore, PassageRecord, RegexSegmenter, Result, StoreConfig,
};

/// Deterministic embedder: hashes the text into a small fixed vector
struct MockEmbedder;

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let sum: u32 = t.bytes().map(u32::from).sum();
                vec![sum as f32, t.len() as f32, 1.0]
            })
            .collect())
    }

    fn dimensions(&self) -> Option<usize> {
        Some(3)
    }
}

fn seed_store(dir: &tempfile::TempDir) -> FsObjectStore {
    let store = FsObjectStore::new(dir.path());
    store
        .write(
            "raw/notes.txt",
            &"A first sentence for the corpus. Another sentence follows it. ".repeat(60),
        )
        .unwrap();
    store
        .write(
            "raw/My-Resume.md",
            "# Experience\n\nBuilt ingestion pipelines. Shipped retrieval systems.",
        )
        .unwrap();
    store
}

fn config_for(dir: &tempfile::TempDir) -> Config {
    Config {
        store: StoreConfig {
            root: dir.path().to_string_lossy().to_string(),
            raw_prefix: "raw/".to_string(),
            out_prefix: "chunked/".to_string(),
            base_url: Some("https://example.com/docs".to_string()),
        },
        ..Config::default()
    }
}

#[test]
fn chunking_run_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);
    let config = config_for(&dir);
    let segmenter = RegexSegmenter::new();

    let (first, _) = run_chunking(&store, &segmenter, &config).unwrap();
    let (second, _) = run_chunking(&store, &segmenter, &config).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.chunk_id, b.chunk_id);
        assert_eq!(a.content, b.content);
        assert_eq!(a.metadata.chunk_index, b.metadata.chunk_index);
    }
}

#[test]
fn chunk_indices_cover_each_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);
    let config = config_for(&dir);

    let (records, stats) = run_chunking(&store, &RegexSegmenter::new(), &config).unwrap();
    assert_eq!(stats.passages, records.len());

    for key in ["raw/notes.txt", "raw/My-Resume.md"] {
        let doc: Vec<&PassageRecord> = records
            .iter()
            .filter(|r| r.metadata.source_key == key)
            .collect();
        assert!(!doc.is_empty(), "no passages for {key}");

        let n = doc[0].metadata.chunk_count;
        assert_eq!(doc.len(), n);
        for (i, record) in doc.iter().enumerate() {
            assert_eq!(record.metadata.chunk_index, i);
            assert_eq!(record.chunk_id, chunk_id(key, i));
            assert!(!record.content.trim().is_empty());
        }
    }
}

#[test]
fn doc_type_inferred_from_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);
    let config = config_for(&dir);

    let (records, _) = run_chunking(&store, &RegexSegmenter::new(), &config).unwrap();

    let resume = records
        .iter()
        .find(|r| r.metadata.source_key == "raw/My-Resume.md")
        .unwrap();
    assert_eq!(resume.doc_type, "resume");

    let notes = records
        .iter()
        .find(|r| r.metadata.source_key == "raw/notes.txt")
        .unwrap();
    assert_eq!(notes.doc_type, "doc");
}

#[test]
fn degraded_extraction_is_counted_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);
    store.write("raw/broken.pdf", "not a pdf at all").unwrap();
    let config = config_for(&dir);

    let (records, stats) = run_chunking(&store, &RegexSegmenter::new(), &config).unwrap();

    assert_eq!(stats.degraded, 1);
    assert_eq!(stats.empty_documents, 1);
    assert!(records
        .iter()
        .all(|r| r.metadata.source_key != "raw/broken.pdf"));
}

#[test]
fn empty_prefix_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsObjectStore::new(dir.path());
    let config = config_for(&dir);

    let err = run_chunking(&store, &RegexSegmenter::new(), &config).unwrap_err();
    assert!(matches!(err, IngotError::NothingToProcess(_)));
}

#[test]
fn jsonl_artifact_round_trips_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);
    let config = config_for(&dir);

    let (records, _) = run_chunking(&store, &RegexSegmenter::new(), &config).unwrap();
    let jsonl = PassageRecord::to_jsonl(&records).unwrap();
    store.write("chunked/chunks.jsonl", &jsonl).unwrap();

    let bytes = store.read("chunked/chunks.jsonl").unwrap();
    let parsed = PassageRecord::from_jsonl(&String::from_utf8(bytes).unwrap()).unwrap();
    assert_eq!(parsed.len(), records.len());
    assert_eq!(parsed[0].chunk_id, records[0].chunk_id);
}

#[tokio::test]
async fn full_run_embeds_and_upserts_idempotently() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(&dir);
    let config = config_for(&dir);

    let (mut records, _) = run_chunking(&store, &RegexSegmenter::new(), &config).unwrap();
    embed_all(&mut records, &MockEmbedder, 2, 2).await.unwrap();

    for record in &records {
        let embedding = record.embedding.as_ref().expect("embedding populated");
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4);
    }

    let db = Database::open_in_memory().unwrap();
    db.initialize().unwrap();

    db.upsert_passages(&records).unwrap();
    let count_after_first = db.count_passages().unwrap();

    // re-ingesting unchanged content is a no-op at the semantic level
    db.upsert_passages(&records).unwrap();
    assert_eq!(db.count_passages().unwrap(), count_after_first);

    let stored = db.get_passage(&records[0].chunk_id).unwrap().unwrap();
    assert_eq!(stored.content, records[0].content);
    assert_eq!(
        stored.embedding.as_deref(),
        records[0].embedding.as_deref()
    );
}
