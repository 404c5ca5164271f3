//! Text extraction from raw document bytes
//!
//! Converts stored objects into plain text by file extension. Extraction is
//! a pure function of the input bytes and never fails a document: a wholly
//! unreadable object degrades to empty text with a recorded reason so the
//! pipeline can log it and move on.

mod html;
mod markdown;
mod pdf;

pub use html::html_to_text;
pub use markdown::markdown_to_text;
pub use pdf::pdf_to_text;

/// Recognized document formats, derived from the key's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Markdown,
    Html,
    Pdf,
    Text,
}

/// Extensions eligible for ingestion
const RECOGNIZED_EXTENSIONS: &[&str] = &["md", "markdown", "html", "htm", "txt", "pdf"];

impl DocFormat {
    /// Classify a key by extension; `None` means the key is not eligible
    pub fn from_key(key: &str) -> Option<DocFormat> {
        let ext = key.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(DocFormat::Markdown),
            "html" | "htm" => Some(DocFormat::Html),
            "pdf" => Some(DocFormat::Pdf),
            "txt" => Some(DocFormat::Text),
            _ => None,
        }
    }

    /// Whether a key carries a recognized extension
    pub fn is_recognized(key: &str) -> bool {
        let lower = key.to_lowercase();
        RECOGNIZED_EXTENSIONS
            .iter()
            .any(|ext| lower.ends_with(&format!(".{ext}")))
    }
}

/// Outcome of extracting one object
///
/// The degraded path is an explicit variant rather than a swallowed error:
/// downstream treats degraded-empty text as "zero chunks produced" but the
/// reason stays observable for logging and tests.
#[derive(Debug, Clone)]
pub enum ExtractOutcome {
    /// Extraction succeeded
    Extracted(String),
    /// Extraction partially or wholly failed; `text` may be empty
    Degraded { text: String, reason: String },
}

impl ExtractOutcome {
    pub fn text(&self) -> &str {
        match self {
            ExtractOutcome::Extracted(text) => text,
            ExtractOutcome::Degraded { text, .. } => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ExtractOutcome::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ExtractOutcome::Extracted(_) => None,
            ExtractOutcome::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Extract plain text from raw object bytes
pub fn extract(bytes: &[u8], format: DocFormat) -> ExtractOutcome {
    match format {
        DocFormat::Markdown => ExtractOutcome::Extracted(markdown_to_text(&decode_lossy(bytes))),
        DocFormat::Html => ExtractOutcome::Extracted(html_to_text(&decode_lossy(bytes))),
        DocFormat::Pdf => pdf_to_text(bytes),
        DocFormat::Text => ExtractOutcome::Extracted(decode_lossy(bytes)),
    }
}

/// UTF-8 decode, replacing undecodable sequences instead of failing
fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
