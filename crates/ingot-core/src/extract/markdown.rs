//! Markdown to plain text
//!
//! Strips markup while preserving line breaks as paragraph separators.
//! Code block content is kept; only the fence lines go.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FENCE_RE: Regex = Regex::new(r"(?m)^\s*(```|~~~).*$").unwrap();
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^#{1,6}\s*").unwrap();
    static ref BLOCKQUOTE_RE: Regex = Regex::new(r"(?m)^>\s?").unwrap();
    static ref HRULE_RE: Regex = Regex::new(r"(?m)^\s*([-*_]\s*){3,}$").unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").unwrap();
    static ref EMPHASIS_RE: Regex = Regex::new(r"\*([^*\n]+)\*|\b_([^_\n]+)_\b").unwrap();
    static ref INLINE_CODE_RE: Regex = Regex::new(r"`([^`]*)`").unwrap();
    static ref HTML_TAG_RE: Regex = Regex::new(r"</?[a-zA-Z][^>]*>").unwrap();
}

/// Strip Markdown markup, keeping the textual content
pub fn markdown_to_text(content: &str) -> String {
    let text = FENCE_RE.replace_all(content, "");
    let text = IMAGE_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HEADING_RE.replace_all(&text, "");
    let text = BLOCKQUOTE_RE.replace_all(&text, "");
    let text = HRULE_RE.replace_all(&text, "");
    let text = BOLD_RE.replace_all(&text, "$1$2");
    let text = EMPHASIS_RE.replace_all(&text, "$1$2");
    let text = INLINE_CODE_RE.replace_all(&text, "$1");
    let text = HTML_TAG_RE.replace_all(&text, "");
    text.trim().to_string()
}
