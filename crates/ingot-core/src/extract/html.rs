//! HTML to plain text
//!
//! Walks the parsed tree collecting text nodes, joined by line breaks so
//! block boundaries survive into normalization. Script/style subtrees are
//! dropped entirely.

use scraper::{ElementRef, Html};

/// Non-content tags whose text never belongs in the extraction
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "head"];

/// Strip HTML markup, keeping text content with line-break separators
pub fn html_to_text(content: &str) -> String {
    let document = Html::parse_document(content);
    let mut pieces = Vec::new();
    collect_text(document.root_element(), &mut pieces);
    pieces.join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut Vec<String>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            collect_text(el, out);
        } else if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
    }
}
