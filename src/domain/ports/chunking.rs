//! Chunking port.

use crate::domain::models::{Chunk, DocumentMetadata};

/// Splits document text into retrieval-sized chunks.
pub trait ChunkingService: Send + Sync {
    /// Chunk `text`, copying `metadata` onto every chunk and stamping each
    /// with its position. Blank input yields no chunks.
    fn chunk(&self, text: &str, metadata: Option<&DocumentMetadata>) -> Vec<Chunk>;
}
