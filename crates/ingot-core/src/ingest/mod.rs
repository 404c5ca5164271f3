//! Ingestion pipeline
//!
//! Normalization, sentence segmentation, chunk packing and document
//! orchestration.

mod chunk;
mod normalize;
mod pipeline;
mod segment;

pub use chunk::{chunk_id, estimate_tokens, pack_sentences};
pub use normalize::normalize;
pub use pipeline::{process_document, run_chunking, ChunkStats, PipelineOptions};
pub use segment::{RegexSegmenter, Segmenter};
