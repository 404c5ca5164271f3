//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ingot")]
#[command(
    author,
    version,
    about = "Ingest documents into a vector-searchable passage store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Object store root (overrides config and INGOT_STORE_ROOT)
    #[arg(long, global = true)]
    pub store_root: Option<String>,

    /// SQLite passage store path (overrides config and INGOT_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Chunk raw documents into a JSONL passage artifact
    Chunk(ChunkArgs),

    /// Embed a JSONL passage artifact and upsert into the store
    Index(IndexArgs),

    /// Chunk, embed and upsert in one pass
    Run(RunArgs),

    /// Show passage store status
    Status,
}

#[derive(Args)]
pub struct ChunkArgs {
    /// Token budget per passage
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Overlap token budget between consecutive passages
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Base URL recorded on each passage
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print a sample instead of writing to the store
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct IndexArgs {
    /// Embedding service URL (overrides config and INGOT_EMBEDDING_URL)
    #[arg(long)]
    pub embedding_url: Option<String>,

    /// Texts per embedding request
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Object-store key of the JSONL artifact
    #[arg(long)]
    pub chunks_key: Option<String>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub chunk: ChunkArgs,

    #[command(flatten)]
    pub index: IndexArgs,
}
