//! Vector infrastructure components
//!
//! Sentence-aware chunking and the exact in-memory nearest-neighbor index
//! used for retrieval.

pub mod chunker;
pub mod index;

pub use chunker::SentenceChunker;
pub use index::VectorIndex;
