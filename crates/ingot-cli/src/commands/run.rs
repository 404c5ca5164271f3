//! `ingot run`: chunk, embed and upsert in one pass

use crate::app::RunArgs;
use anyhow::Result;
use ingot_core::{Config, FsObjectStore, ObjectStore, PassageRecord};
use std::path::Path;

pub async fn run(args: &RunArgs, config: &Config, db_path: &Path) -> Result<()> {
    let config = super::index::apply_args(&super::chunk::apply_args(config, &args.chunk), &args.index);

    let (mut records, stats) = super::chunk::chunk_documents(&config)?;
    println!(
        "Chunked {} documents into {} passages",
        stats.documents, stats.passages
    );

    // Keep the intermediate artifact: it documents exactly what this run
    // embedded and lets `index` re-run without re-chunking.
    let store = FsObjectStore::new(&config.store.root);
    let key = super::chunk::chunks_key(&config);
    store.write(&key, &PassageRecord::to_jsonl(&records)?)?;

    super::index::embed_and_upsert(&mut records, &config, db_path).await
}
