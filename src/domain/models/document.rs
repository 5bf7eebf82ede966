//! Document, search and index reporting models

use serde::{Deserialize, Serialize};

use super::chunking::{Chunk, ChunkMetadata, DocumentMetadata};

/// Raw document text read at load time. Dropped once chunked.
#[derive(Debug, Clone)]
pub struct Document {
    /// Full file contents
    pub text: String,
    /// Where the text came from
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Document from text and metadata
    pub fn new(text: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// One nearest-neighbor hit, copied out of the index for a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Chunk text
    pub text: String,
    /// Chunk provenance
    pub metadata: ChunkMetadata,

    /// Squared Euclidean distance to the query vector
    pub distance: f32,
}

impl SearchResult {
    /// Copy a stored chunk into a result
    pub fn from_chunk(chunk: &Chunk, distance: f32) -> Self {
        Self {
            text: chunk.text.clone(),
            metadata: chunk.metadata.clone(),
            distance,
        }
    }

    /// Source file of the hit, if recorded
    pub fn filename(&self) -> Option<&str> {
        self.metadata.filename.as_deref()
    }
}

/// Summary of what the vector index currently holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Chunks stored in the index
    pub total_chunks: usize,
    /// Distinct source files
    pub total_files: usize,
    /// Source file names, sorted
    pub files: Vec<String>,
}

/// A corpus file that was left out of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// File name
    pub filename: String,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of one corpus load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Files that made it into the index
    pub files_indexed: usize,
    /// Chunks added across those files
    pub chunks_added: usize,
    /// Files left out, in load order
    pub skipped: Vec<SkippedFile>,
}

impl LoadReport {
    /// Record a file that was left out
    pub fn record_skip(&mut self, filename: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            filename: filename.into(),
            reason: reason.into(),
        });
    }

    /// Indexed plus skipped
    pub fn files_seen(&self) -> usize {
        self.files_indexed + self.skipped.len()
    }
}
