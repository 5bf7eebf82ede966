//! Property-based tests for the sentence chunker
//!
//! Tests the following properties:
//! 1. Coverage: chunks minus their overlap prefix rebuild the normalized text
//! 2. Overlap: every chunk after the first starts with its predecessor's tail
//! 3. Size: chunks stay within budget unless a single sentence is larger
//! 4. Metadata: positions are consecutive and totals agree

use proptest::prelude::*;

use ragchat::domain::models::ChunkingConfig;
use ragchat::infrastructure::vector::chunker::{normalize_whitespace, overlap_tail, split_sentences};
use ragchat::{ChunkingService, SentenceChunker};

mod common;

/// A sentence of 1-8 lowercase words ending in `.`, `!` or `?`
fn sentence_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z]{1,8}", 1..8),
        prop::sample::select(vec!['.', '!', '?']),
    )
        .prop_map(|(words, end)| format!("{}{end}", words.join(" ")))
}

/// Sentences joined by assorted whitespace
fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (sentence_strategy(), prop::sample::select(vec![" ", "  ", "\n", "\n\n", "\t "])),
        0..25,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(sentence, gap)| format!("{sentence}{gap}"))
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = ChunkingConfig> {
    (1usize..120, 0usize..60).prop_map(|(size, overlap)| ChunkingConfig::new(size, overlap))
}

/// Drop the overlap prefix each chunk inherited from its predecessor
fn strip_overlap(chunks: &[String], overlap: usize) -> Vec<String> {
    let mut fresh = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        if i == 0 {
            fresh.push(chunk.clone());
            continue;
        }
        let tail = overlap_tail(&chunks[i - 1], overlap);
        if tail.is_empty() {
            fresh.push(chunk.clone());
        } else {
            fresh.push(chunk[tail.len() + 1..].to_string());
        }
    }
    fresh
}

proptest! {
    #[test]
    fn proptest_chunks_cover_text(text in document_strategy(), config in config_strategy()) {
        let chunker = SentenceChunker::new(config).expect("valid config");
        let chunks = chunker.split(&text);

        let normalized = normalize_whitespace(&text);
        prop_assert_eq!(chunks.is_empty(), normalized.is_empty());
        prop_assert_eq!(strip_overlap(&chunks, config.chunk_overlap).join(" "), normalized);
    }

    #[test]
    fn proptest_overlap_prefix(text in document_strategy(), config in config_strategy()) {
        let chunks = SentenceChunker::new(config).expect("valid config").split(&text);

        for pair in chunks.windows(2) {
            let tail = overlap_tail(&pair[0], config.chunk_overlap);
            if tail.is_empty() {
                continue;
            }
            let prefix = format!("{tail} ");
            prop_assert!(pair[1].starts_with(&prefix));
            prop_assert!(pair[0].ends_with(tail));
            if config.chunk_overlap < pair[0].chars().count() {
                prop_assert!(tail.chars().count() <= config.chunk_overlap);
            }
        }
    }

    #[test]
    fn proptest_chunk_size_bound(text in document_strategy(), config in config_strategy()) {
        let chunks = SentenceChunker::new(config).expect("valid config").split(&text);
        let normalized = normalize_whitespace(&text);
        let longest = split_sentences(&normalized)
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);

        let bound = (config.chunk_size + 1).max(config.chunk_overlap + 1 + longest);
        for chunk in &chunks {
            prop_assert!(chunk.chars().count() <= bound);
        }
    }

    #[test]
    fn proptest_chunk_positions(text in document_strategy(), config in config_strategy()) {
        let chunks = SentenceChunker::new(config).expect("valid config").chunk(&text, None);
        let total = chunks.len();

        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.metadata.position(), Some((i, total)));
            prop_assert_eq!(chunk.is_first(), i == 0);
            prop_assert!(!chunk.text.trim().is_empty());
        }
    }

    #[test]
    fn proptest_without_overlap_sentences_are_never_split(
        text in document_strategy(),
        size in 1usize..120,
    ) {
        let chunks = SentenceChunker::new(ChunkingConfig::new(size, 0))
            .expect("valid config")
            .split(&text);
        let normalized = normalize_whitespace(&text);

        let mut from_chunks = Vec::new();
        for chunk in &chunks {
            from_chunks.extend(split_sentences(chunk));
        }
        prop_assert_eq!(from_chunks, split_sentences(&normalized));
    }
}
