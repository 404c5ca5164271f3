//! `ingot chunk`: raw documents to JSONL passage artifact

use crate::app::ChunkArgs;
use anyhow::Result;
use ingot_core::{
    run_chunking, ChunkStats, Config, FsObjectStore, ObjectStore, PassageRecord, RegexSegmenter,
    DEFAULT_CHUNKS_KEY,
};

const DRY_RUN_SAMPLE_CHARS: usize = 2000;

/// Apply command-line overrides onto the loaded config
pub fn apply_args(config: &Config, args: &ChunkArgs) -> Config {
    let mut config = config.clone();
    if let Some(max_tokens) = args.max_tokens {
        config.chunking.max_tokens = max_tokens;
    }
    if let Some(overlap) = args.overlap {
        config.chunking.overlap_tokens = overlap;
    }
    if let Some(ref base_url) = args.base_url {
        config.store.base_url = Some(base_url.clone());
    }
    config
}

/// Chunk all eligible documents and return the records plus run stats
pub fn chunk_documents(config: &Config) -> Result<(Vec<PassageRecord>, ChunkStats)> {
    config.validate()?;
    let store = FsObjectStore::new(&config.store.root);
    let segmenter = RegexSegmenter::new();
    let (records, stats) = run_chunking(&store, &segmenter, config)?;
    Ok((records, stats))
}

/// Object-store key of the JSONL artifact for this config
pub fn chunks_key(config: &Config) -> String {
    format!(
        "{}/{}",
        config.store.out_prefix.trim_end_matches('/'),
        DEFAULT_CHUNKS_KEY.rsplit('/').next().unwrap_or("chunks.jsonl")
    )
}

pub fn run(args: &ChunkArgs, config: &Config) -> Result<()> {
    let config = apply_args(config, args);
    let (records, stats) = chunk_documents(&config)?;
    let jsonl = PassageRecord::to_jsonl(&records)?;

    if args.dry_run {
        let sample: String = jsonl.chars().take(DRY_RUN_SAMPLE_CHARS).collect();
        println!("{sample}");
    } else {
        let store = FsObjectStore::new(&config.store.root);
        let key = chunks_key(&config);
        store.write(&key, &jsonl)?;
        println!(
            "Wrote {} passages from {} documents -> {}",
            stats.passages, stats.documents, key
        );
    }

    if stats.empty_documents > 0 {
        println!("Skipped {} empty/unreadable documents", stats.empty_documents);
    }

    Ok(())
}
