//! Chunk packing and identity
//!
//! Greedy sentence packing into token-budgeted passages with bounded
//! sentence-level overlap, plus the stable chunk id that keys idempotent
//! upserts.

use sha2::{Digest, Sha256};

/// Estimate token cost of a sentence as `max(1, chars / 4)`.
///
/// A deliberately cheap approximation rather than a real tokenizer: chunk
/// boundaries, and therefore every chunk id, depend on this exact estimate
/// staying reproducible across re-ingestion.
pub fn estimate_tokens(text: &str) -> usize {
    (text.chars().count() / 4).max(1)
}

/// Pack sentences into passages of at most `max_tokens` estimated tokens,
/// seeding each new passage with a suffix of the previous one bounded by
/// `overlap_tokens`.
///
/// Sentences are never split: a single sentence over `max_tokens` is kept
/// whole as accepted overflow. Output passages are trimmed and non-empty.
pub fn pack_sentences(
    sentences: &[String],
    max_tokens: usize,
    overlap_tokens: usize,
) -> Vec<String> {
    let mut passages = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_tokens = 0usize;

    for sentence in sentences {
        let cost = estimate_tokens(sentence);

        if !current.is_empty() && current_tokens + cost > max_tokens {
            flush(&current, &mut passages);

            // Seed the next passage with the closed passage's tail, walking
            // backward until the overlap budget would be exceeded.
            let mut seed: Vec<&str> = Vec::new();
            let mut seed_tokens = 0usize;
            for prev in current.iter().rev() {
                let prev_cost = estimate_tokens(prev);
                if seed_tokens + prev_cost > overlap_tokens {
                    break;
                }
                seed_tokens += prev_cost;
                seed.push(prev);
            }
            seed.reverse();
            current = seed;
            current_tokens = seed_tokens;
        }

        current.push(sentence);
        current_tokens += cost;
    }

    flush(&current, &mut passages);
    passages
}

fn flush(sentences: &[&str], passages: &mut Vec<String>) {
    if sentences.is_empty() {
        return;
    }
    let passage = sentences.join(" ").trim().to_string();
    if !passage.is_empty() {
        passages.push(passage);
    }
}

/// Derive the stable chunk id for `(source_key, index)`.
///
/// First 16 hex characters of `sha256("{source_key}::{index}")` plus a
/// zero-padded index suffix. The sole primary key for upserts: re-running
/// the pipeline on unchanged content reproduces every id exactly.
pub fn chunk_id(source_key: &str, index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{source_key}::{index}").as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("{}-{:04}", &digest[..16], index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences_of(n: usize, chars_each: usize) -> Vec<String> {
        (0..n).map(|i| format!("{i:0width$}", width = chars_each)).collect()
    }

    #[test]
    fn test_estimate_floor_is_one() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
    }

    #[test]
    fn test_two_passage_split_with_overlap() {
        // 12 sentences of 400 chars = 100 tokens each: 1200 tokens total
        // packs into 2 passages at max 600 with a 50-token overlap budget
        // (no sentence fits in 50, so passage 2 starts fresh at sentence 7)
        let sentences = sentences_of(12, 400);
        let passages = pack_sentences(&sentences, 600, 50);
        assert_eq!(passages.len(), 2);
        assert!(passages[0].starts_with(&sentences[0]));
        assert!(passages[1].starts_with(&sentences[6]));
    }

    #[test]
    fn test_overlap_seeds_tail_of_previous() {
        // 25-token sentences, max 100, overlap 50: passages close at 4
        // sentences and each next passage opens with the previous two
        let sentences = sentences_of(8, 100);
        let passages = pack_sentences(&sentences, 100, 50);
        assert!(passages.len() >= 2);
        assert!(passages[0].ends_with(&format!("{} {}", sentences[2], sentences[3])));
        assert!(passages[1].starts_with(&format!("{} {}", sentences[2], sentences[3])));
    }

    #[test]
    fn test_overlap_bound_respected() {
        let sentences = sentences_of(8, 100);
        let passages = pack_sentences(&sentences, 100, 50);
        for pair in passages.windows(2) {
            let first: Vec<&str> = pair[0].split(' ').collect();
            let second: Vec<&str> = pair[1].split(' ').collect();
            let max_k = first.len().min(second.len());
            let mut shared = 0;
            for k in (1..=max_k).rev() {
                if first[first.len() - k..] == second[..k] {
                    shared = k;
                    break;
                }
            }
            // shared suffix/prefix exists but its cost stays within budget
            let shared_tokens: usize = second[..shared]
                .iter()
                .map(|s| estimate_tokens(s))
                .sum();
            assert!(shared_tokens <= 50);
        }
    }

    #[test]
    fn test_oversized_sentence_kept_whole() {
        let sentences = vec!["x".repeat(4000)]; // 1000 tokens
        let passages = pack_sentences(&sentences, 600, 50);
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].len(), 4000);
    }

    #[test]
    fn test_empty_input() {
        assert!(pack_sentences(&[], 600, 50).is_empty());
    }

    #[test]
    fn test_chunk_id_deterministic() {
        let a = chunk_id("raw/notes.txt", 0);
        let b = chunk_id("raw/notes.txt", 0);
        assert_eq!(a, b);
        assert_ne!(a, chunk_id("raw/notes.txt", 1));
        assert_ne!(a, chunk_id("raw/other.txt", 0));
    }

    #[test]
    fn test_chunk_id_shape() {
        let id = chunk_id("raw/notes.txt", 7);
        let (hash, suffix) = id.split_once('-').unwrap();
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(suffix, "0007");
    }
}
