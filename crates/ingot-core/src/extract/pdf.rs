//! PDF to plain text
//!
//! Page-wise extraction with pages joined by a double line break. A PDF
//! that cannot be opened at all degrades to empty text with the reason
//! recorded; it never aborts the run.

use super::ExtractOutcome;

/// Extract text from PDF bytes
pub fn pdf_to_text(bytes: &[u8]) -> ExtractOutcome {
    match pdf_extract::extract_text_from_mem_by_pages(bytes) {
        Ok(pages) => ExtractOutcome::Extracted(pages.join("\n\n")),
        Err(page_err) => {
            // Page-wise extraction can trip on odd page trees; the whole
            // document path sometimes still succeeds.
            match pdf_extract::extract_text_from_mem(bytes) {
                Ok(text) => ExtractOutcome::Degraded {
                    text,
                    reason: format!("page-wise extraction failed: {page_err}"),
                },
                Err(doc_err) => ExtractOutcome::Degraded {
                    text: String::new(),
                    reason: format!("unreadable PDF: {doc_err}"),
                },
            }
        }
    }
}
