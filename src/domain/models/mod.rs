//! Domain models shared across the pipeline

pub mod chunking;
pub mod config;
pub mod document;
pub mod provider;

pub use chunking::{Chunk, ChunkMetadata, ChunkingConfig, DocumentMetadata};
pub use config::{
    Config, CorpusConfig, GoogleSettings, LogFormat, LoggingConfig, OpenAiSettings,
    ProvidersConfig, RetrievalConfig, RotationPolicy,
};
pub use document::{Document, IndexStats, LoadReport, SearchResult, SkippedFile};
pub use provider::{Completion, ProviderAvailability, ProviderKind, ProviderStatus, QueryResponse};
