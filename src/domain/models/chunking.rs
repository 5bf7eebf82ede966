//! Text chunking domain models
//!
//! A chunk is the unit of retrieval: a bounded span of one document's text,
//! tagged with where it came from and where it sits in that document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration for document chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChunkingConfig {
    /// Target maximum size of each chunk in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters carried over from the end of one chunk into the next
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

const fn default_chunk_size() -> usize {
    500
}

const fn default_chunk_overlap() -> usize {
    50
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl ChunkingConfig {
    /// Config with the given size and overlap, both in characters
    pub const fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Validate the chunking configuration
    ///
    /// An overlap larger than the chunk size is accepted; it only produces
    /// near-duplicate chunks.
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Source metadata attached to a document before chunking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Source file name
    pub filename: Option<String>,
    /// Source file path as given to the loader
    pub file_path: Option<String>,

    /// Caller-supplied fields copied onto every chunk
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentMetadata {
    /// Metadata naming a corpus file
    pub fn for_file(filename: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            file_path: Some(file_path.into()),
            extra: Map::new(),
        }
    }

    /// Add a custom field
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Metadata carried by every chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source file name
    pub filename: Option<String>,
    /// Source file path
    pub file_path: Option<String>,

    /// Zero-based position of the chunk within its document
    pub chunk_index: Option<usize>,

    /// Number of chunks the document produced
    pub total_chunks: Option<usize>,

    /// Fields inherited from the document metadata
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl ChunkMetadata {
    /// Seed chunk metadata from the document it was cut from
    pub fn from_document(document: &DocumentMetadata) -> Self {
        Self {
            filename: document.filename.clone(),
            file_path: document.file_path.clone(),
            chunk_index: None,
            total_chunks: None,
            extra: document.extra.clone(),
        }
    }

    /// Returns `(chunk_index, total_chunks)` when both are known
    pub const fn position(&self) -> Option<(usize, usize)> {
        match (self.chunk_index, self.total_chunks) {
            (Some(index), Some(total)) => Some((index, total)),
            _ => None,
        }
    }
}

/// A chunk of text extracted from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text, whitespace-normalized
    pub text: String,
    /// Provenance of the chunk
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Chunk from text and metadata
    pub fn new(text: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Returns true if this is the first chunk of its document
    pub fn is_first(&self) -> bool {
        self.metadata.chunk_index == Some(0)
    }

    /// Get a preview of the content (first 100 chars)
    pub fn preview(&self) -> String {
        match self.text.char_indices().nth(100) {
            Some((cut, _)) => format!("{}...", &self.text[..cut]),
            None => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_config_default() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chunking_config_validation() {
        assert!(ChunkingConfig::new(0, 0).validate().is_err());
        // Oversized overlap is tolerated
        assert!(ChunkingConfig::new(100, 150).validate().is_ok());
    }

    #[test]
    fn test_chunk_metadata_from_document() {
        let doc = DocumentMetadata::for_file("about.txt", "documents/about.txt")
            .with_extra("lang", serde_json::json!("en"));
        let meta = ChunkMetadata::from_document(&doc);

        assert_eq!(meta.filename.as_deref(), Some("about.txt"));
        assert_eq!(meta.file_path.as_deref(), Some("documents/about.txt"));
        assert_eq!(meta.extra.get("lang"), Some(&serde_json::json!("en")));
        assert_eq!(meta.position(), None);
    }

    #[test]
    fn test_chunk_metadata_serializes_flat() {
        let mut meta = ChunkMetadata {
            filename: Some("a.txt".to_string()),
            chunk_index: Some(1),
            total_chunks: Some(3),
            ..Default::default()
        };
        meta.extra
            .insert("author".to_string(), serde_json::json!("docs team"));

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["filename"], "a.txt");
        assert_eq!(value["chunk_index"], 1);
        assert_eq!(value["author"], "docs team");
    }

    #[test]
    fn test_chunk_preview() {
        let short = Chunk::new("short", ChunkMetadata::default());
        assert_eq!(short.preview(), "short");

        let long = Chunk::new("a".repeat(200), ChunkMetadata::default());
        assert_eq!(long.preview().len(), 103); // 100 chars + "..."
    }

    #[test]
    fn test_chunk_is_first() {
        let chunk = Chunk::new(
            "text",
            ChunkMetadata {
                chunk_index: Some(0),
                ..Default::default()
            },
        );
        assert!(chunk.is_first());
    }
}
