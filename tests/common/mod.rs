//! Common test utilities for integration tests
//!
//! Provides corpus fixtures and mock-backed service wiring shared across
//! the integration test files.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use ragchat::adapters::providers::MockProvider;
use ragchat::domain::models::{ChunkingConfig, Config};
use ragchat::{ChatService, ModelProvider, ProviderGateway, SentenceChunker};

/// Dimension used by the mock-backed pipelines
pub const DIM: usize = 768;

/// Create a temporary directory for test isolation
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Create a temporary corpus folder holding `files` as (name, contents)
pub fn corpus(files: &[(&str, &str)]) -> TempDir {
    let dir = temp_dir();
    for (name, contents) in files {
        std::fs::write(dir.path().join(name), contents).expect("Failed to write corpus file");
    }
    dir
}

/// Config pointing at `docs` with the given chunking and the mock dimension
pub fn config_for(docs: &Path, chunk_size: usize, chunk_overlap: usize) -> Config {
    let mut config = Config::default();
    config.corpus.documents_dir = docs.to_path_buf();
    config.chunking = ChunkingConfig::new(chunk_size, chunk_overlap);
    config.retrieval.dimension = DIM;
    config
}

/// Gateway over mock providers, in priority order
pub fn mock_gateway(providers: &[Arc<MockProvider>]) -> Arc<ProviderGateway> {
    let chain = providers
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn ModelProvider>)
        .collect();
    Arc::new(ProviderGateway::new(chain).expect("Failed to build gateway"))
}

/// Chat service wired to mock providers
pub fn mock_service(config: &Config, providers: &[Arc<MockProvider>]) -> ChatService {
    let chunker = SentenceChunker::new(config.chunking).expect("Invalid chunking config");
    ChatService::new(mock_gateway(providers), Arc::new(chunker), config)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
