//! Ragchat - Retrieval-Augmented Chat Backend
//!
//! Ragchat answers questions about a folder of plain-text documents. Documents
//! are split into overlapping sentence-aligned chunks, embedded through a
//! remote model provider and kept in an in-memory nearest-neighbour index.
//! Each question retrieves the closest chunks and sends them, together with
//! the question, to a chat model. Google Gemini and OpenAI are supported; when
//! both are configured the second acts as a fallback for the first.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the provider/chunker ports
//! - **Adapter Layer** (`adapters`): HTTP model providers and a deterministic mock
//! - **Infrastructure Layer** (`infrastructure`): config, logging, chunker, vector index
//! - **Service Layer** (`services`): provider gateway, corpus loader, chat service
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ragchat::{ChatService, ConfigLoader, IndexInit, ProviderGateway, SentenceChunker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let gateway = Arc::new(ProviderGateway::from_config(&config.providers)?);
//!     let chunker = Arc::new(SentenceChunker::new(config.chunking)?);
//!     let service = ChatService::new(gateway, chunker, &config);
//!     service.initialize(IndexInit::Build).await?;
//!
//!     let reply = service.submit_query("user-1", "What does the company do?").await?;
//!     println!("{} ({})", reply.response_text, reply.provider_name);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ProviderError, RagError, RagResult};
pub use domain::models::{
    Chunk, ChunkMetadata, ChunkingConfig, Config, DocumentMetadata, IndexStats, LoadReport,
    ProviderKind, ProviderStatus, QueryResponse, SearchResult,
};
pub use domain::ports::{ChunkingService, ModelProvider};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::vector::{SentenceChunker, VectorIndex};
pub use services::{ChatService, ContextAssembler, CorpusLoader, IndexInit, ProviderGateway};
