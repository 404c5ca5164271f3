//! Passage records, the unit that crosses the pipeline/storage boundary

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One retrieval-sized passage of a source document
///
/// Identity (`chunk_id`) is immutable once assigned; every other field may
/// be overwritten when the same logical chunk is re-ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageRecord {
    /// Deterministic key derived from (source key, position)
    pub chunk_id: String,

    /// Human-readable label, derived from the filename if not supplied
    pub title: String,

    /// Optional external locator (base URL + filename)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Normalized passage text; non-empty and trimmed
    pub content: String,

    /// Coarse classification inferred from the source key
    pub section: String,

    /// Same classification, duplicated for flat filtering
    pub doc_type: String,

    pub metadata: PassageMetadata,

    /// Unit-normalized embedding; absent until the batcher runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// Structured passage metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageMetadata {
    pub source_key: String,
    pub language: String,
    pub doc_type: String,
    pub chunk_index: usize,
    pub chunk_count: usize,
    pub updated_at: String,
}

impl PassageRecord {
    /// Serialize a record set to newline-delimited JSON
    pub fn to_jsonl(records: &[PassageRecord]) -> Result<String> {
        let mut out = String::new();
        for record in records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse newline-delimited JSON, skipping blank lines
    pub fn from_jsonl(text: &str) -> Result<Vec<PassageRecord>> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Ok(serde_json::from_str(line)?))
            .collect()
    }
}

/// Doc-type keywords, checked in order; first match wins
const DOC_TYPE_KEYWORDS: &[(&[&str], &str)] = &[
    (&["resume", "cv"], "resume"),
    (&["project", "portfolio"], "projects"),
    (&["bio", "about"], "bio"),
    (&["faq", "qna"], "faq"),
];

/// Infer a coarse document type from the source key
pub fn guess_doc_type(key: &str) -> &'static str {
    let name = key.to_lowercase();
    for (keywords, doc_type) in DOC_TYPE_KEYWORDS {
        if keywords.iter().any(|kw| name.contains(kw)) {
            return doc_type;
        }
    }
    "doc"
}

/// Derive a display title from the source key: file stem, separators to
/// spaces, each word capitalized
pub fn title_from_key(key: &str) -> String {
    let name = key.rsplit('/').next().unwrap_or(key);
    let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);

    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// File name component of a key
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_doc_type_resume() {
        assert_eq!(guess_doc_type("raw/My-Resume.pdf"), "resume");
        assert_eq!(guess_doc_type("raw/cv-2024.pdf"), "resume");
    }

    #[test]
    fn test_guess_doc_type_default() {
        assert_eq!(guess_doc_type("raw/notes.txt"), "doc");
    }

    #[test]
    fn test_guess_doc_type_order() {
        // resume wins over projects when both keywords appear
        assert_eq!(guess_doc_type("raw/resume-projects.md"), "resume");
        assert_eq!(guess_doc_type("raw/portfolio.html"), "projects");
        assert_eq!(guess_doc_type("raw/about-me.md"), "bio");
        assert_eq!(guess_doc_type("raw/qna.txt"), "faq");
    }

    #[test]
    fn test_title_from_key() {
        assert_eq!(title_from_key("raw/my-resume.pdf"), "My Resume");
        assert_eq!(title_from_key("notes_2024.txt"), "Notes 2024");
    }

    #[test]
    fn test_jsonl_round_trip() {
        let record = PassageRecord {
            chunk_id: "abc-0000".to_string(),
            title: "Notes".to_string(),
            url: None,
            content: "Some text.".to_string(),
            section: "doc".to_string(),
            doc_type: "doc".to_string(),
            metadata: PassageMetadata {
                source_key: "raw/notes.txt".to_string(),
                language: "en".to_string(),
                doc_type: "doc".to_string(),
                chunk_index: 0,
                chunk_count: 1,
                updated_at: "2024-01-01T00:00:00Z".to_string(),
            },
            embedding: None,
        };

        let jsonl = PassageRecord::to_jsonl(&[record.clone()]).unwrap();
        // embedding is omitted until populated
        assert!(!jsonl.contains("embedding"));

        let parsed = PassageRecord::from_jsonl(&jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].chunk_id, record.chunk_id);
        assert_eq!(parsed[0].content, record.content);
    }
}
