//! `ingot index`: JSONL artifact to embedded, upserted passages

use crate::app::IndexArgs;
use anyhow::Result;
use ingot_core::{
    embed_all, Config, Database, FsObjectStore, HttpEmbedder, ObjectStore, PassageRecord,
};
use std::path::Path;

/// Apply command-line overrides onto the loaded config
pub fn apply_args(config: &Config, args: &IndexArgs) -> Config {
    let mut config = config.clone();
    if let Some(ref url) = args.embedding_url {
        config.embedding.url = url.clone();
    }
    if let Some(batch_size) = args.batch_size {
        config.embedding.batch_size = batch_size;
    }
    config
}

/// Embed records and upsert them in a single transaction
pub async fn embed_and_upsert(
    records: &mut Vec<PassageRecord>,
    config: &Config,
    db_path: &Path,
) -> Result<()> {
    config.validate_embedding()?;

    let embedder = HttpEmbedder::from_config(config.embedding.clone())?;
    embed_all(
        records,
        &embedder,
        config.embedding.batch_size,
        config.embedding.max_concurrent,
    )
    .await?;

    let db = Database::open(db_path)?;
    db.initialize()?;
    let upserted = db.upsert_passages(records)?;
    println!("Upserted {upserted} passages -> {}", db_path.display());

    Ok(())
}

pub async fn run(args: &IndexArgs, config: &Config, db_path: &Path) -> Result<()> {
    let config = apply_args(config, args);
    config.validate()?;

    let store = FsObjectStore::new(&config.store.root);
    let key = args
        .chunks_key
        .clone()
        .unwrap_or_else(|| super::chunk::chunks_key(&config));

    let bytes = store.read(&key)?;
    let mut records = PassageRecord::from_jsonl(&String::from_utf8_lossy(&bytes))?;
    println!("Loaded {} passages from {key}", records.len());

    embed_and_upsert(&mut records, &config, db_path).await
}
