//! Sentence-respecting text chunker
//!
//! Greedily packs whole sentences into chunks of roughly `chunk_size`
//! characters. Each chunk after the first is seeded with a word-aligned tail
//! of its predecessor so context carries across boundaries. Sizes are
//! measured in characters, not bytes.

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{Chunk, ChunkMetadata, ChunkingConfig, DocumentMetadata};
use crate::domain::ports::ChunkingService;

/// Sentence-aware chunking service
#[derive(Debug, Clone, Copy)]
pub struct SentenceChunker {
    config: ChunkingConfig,
}

impl SentenceChunker {
    /// Create a new chunker with custom configuration
    pub fn new(config: ChunkingConfig) -> RagResult<Self> {
        config
            .validate()
            .map_err(|e| RagError::Configuration(format!("invalid chunking config: {e}")))?;
        Ok(Self { config })
    }

    /// The validated chunking parameters
    pub const fn config(&self) -> ChunkingConfig {
        self.config
    }

    /// Split text into chunk strings, before metadata is attached
    pub fn split(&self, text: &str) -> Vec<String> {
        let normalized = normalize_whitespace(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_len = 0;

        for sentence in split_sentences(&normalized) {
            let sentence_len = sentence.chars().count();

            if !buffer.is_empty() && buffer_len + sentence_len > self.config.chunk_size {
                let tail = overlap_tail(&buffer, self.config.chunk_overlap).to_string();
                chunks.push(std::mem::take(&mut buffer));
                buffer_len = 0;

                if !tail.is_empty() {
                    buffer_len = tail.chars().count();
                    buffer = tail;
                }
            }

            if !buffer.is_empty() {
                buffer.push(' ');
                buffer_len += 1;
            }
            buffer.push_str(sentence);
            buffer_len += sentence_len;
        }

        if !buffer.is_empty() {
            chunks.push(buffer);
        }
        chunks
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }
}

impl ChunkingService for SentenceChunker {
    fn chunk(&self, text: &str, metadata: Option<&DocumentMetadata>) -> Vec<Chunk> {
        let base = metadata.map(ChunkMetadata::from_document).unwrap_or_default();
        let texts = self.split(text);
        let total = texts.len();

        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let mut meta = base.clone();
                meta.chunk_index = Some(index);
                meta.total_chunks = Some(total);
                Chunk::new(text, meta)
            })
            .collect()
    }
}

/// Collapse runs of whitespace to single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text after `.`, `!` or `?` followed by whitespace.
///
/// Terminal punctuation stays with its sentence; the separating space is
/// dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next, ws)) = chars.peek() {
            if ws.is_whitespace() {
                let sentence = text[start..next].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = next + ws.len_utf8();
                debug_assert!(start > i);
            }
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// The last `overlap` characters of `text`, moved forward to the next word
/// boundary so no word is split. Empty when the window holds no whole word.
pub fn overlap_tail(text: &str, overlap: usize) -> &str {
    if overlap == 0 {
        return "";
    }

    let total = text.chars().count();
    if overlap >= total {
        return text.trim();
    }

    let start = text
        .char_indices()
        .nth(total - overlap)
        .map_or(text.len(), |(i, _)| i);
    let on_boundary = text[..start]
        .chars()
        .next_back()
        .is_some_and(char::is_whitespace);

    let tail = &text[start..];
    if on_boundary {
        return tail.trim();
    }
    tail.find(char::is_whitespace)
        .map_or("", |i| tail[i..].trim())
}
