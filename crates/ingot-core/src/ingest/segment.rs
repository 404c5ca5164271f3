//! Sentence segmentation
//!
//! A heuristic splitter favoring precision on well-formed prose over
//! recall on abbreviations. Kept behind a trait so a smarter segmenter can
//! be swapped in without touching the packer or identity assignment.

use lazy_static::lazy_static;
use regex::Regex;

/// Sentence segmentation strategy
pub trait Segmenter: Send + Sync {
    /// Split normalized text into ordered, non-empty sentences
    fn segment(&self, text: &str) -> Vec<String>;
}

lazy_static! {
    // sentence-final punctuation, whitespace, then an uppercase letter or
    // an opening quote/parenthesis
    static ref BOUNDARY_RE: Regex = Regex::new(r#"([.!?])\s+(["'(\[]|\p{Lu})"#).unwrap();
}

/// Regex-backed sentence segmenter
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSegmenter;

impl RegexSegmenter {
    pub fn new() -> Self {
        Self
    }

    fn split_paragraph(paragraph: &str, out: &mut Vec<String>) {
        let mut last = 0;
        for caps in BOUNDARY_RE.captures_iter(paragraph) {
            let punct = caps.get(1).expect("boundary capture");
            let next = caps.get(2).expect("boundary capture");
            let sentence = paragraph[last..punct.end()].trim();
            if !sentence.is_empty() {
                out.push(sentence.to_string());
            }
            last = next.start();
        }
        let tail = paragraph[last..].trim();
        if !tail.is_empty() {
            out.push(tail.to_string());
        }
    }
}

impl Segmenter for RegexSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for paragraph in text.split('\n') {
            if paragraph.trim().is_empty() {
                continue;
            }
            Self::split_paragraph(paragraph, &mut sentences);
        }
        sentences
    }
}
