//! Chat service
//!
//! The caller-facing retrieval API. Owns the shared vector index behind a
//! single-writer/many-reader lock and wires retrieval into generation.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{
    Config, IndexStats, LoadReport, ProviderStatus, QueryResponse, SearchResult,
};
use crate::domain::ports::ChunkingService;
use crate::infrastructure::vector::VectorIndex;
use crate::services::context_assembler::ContextAssembler;
use crate::services::corpus_loader::CorpusLoader;
use crate::services::provider_gateway::ProviderGateway;

/// How the index is prepared when the service starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexInit {
    /// Load the corpus now
    Build,
    /// Start with an empty index; the caller rebuilds later (or never, for
    /// diagnostics that only need the gateway)
    Deferred,
}

/// Retrieval-augmented chat over a document corpus
pub struct ChatService {
    gateway: Arc<ProviderGateway>,
    loader: CorpusLoader,
    assembler: ContextAssembler,
    index: RwLock<VectorIndex>,
    documents_dir: PathBuf,
    dimension: usize,
    top_k: usize,
}

impl ChatService {
    /// Service with an empty index; call [`Self::initialize`] before querying.
    pub fn new(
        gateway: Arc<ProviderGateway>,
        chunker: Arc<dyn ChunkingService>,
        config: &Config,
    ) -> Self {
        let loader = CorpusLoader::new(Arc::clone(&gateway), chunker, &config.corpus.extensions);
        Self {
            gateway,
            loader,
            assembler: ContextAssembler::new(),
            index: RwLock::new(VectorIndex::new(config.retrieval.dimension)),
            documents_dir: config.corpus.documents_dir.clone(),
            dimension: config.retrieval.dimension,
            top_k: config.retrieval.top_k,
        }
    }

    /// Prepare the index. Returns the load report when a build ran.
    pub async fn initialize(&self, mode: IndexInit) -> RagResult<Option<LoadReport>> {
        match mode {
            IndexInit::Build => self.rebuild_index().await.map(Some),
            IndexInit::Deferred => {
                tracing::debug!("index build deferred");
                Ok(None)
            }
        }
    }

    /// Load the corpus into a fresh index and swap it in.
    ///
    /// The build runs without holding the lock, so queries keep using the
    /// previous index until the swap. On error the previous index is kept.
    pub async fn rebuild_index(&self) -> RagResult<LoadReport> {
        let mut fresh = VectorIndex::new(self.dimension);
        let report = self
            .loader
            .load_from_folder(&self.documents_dir, &mut fresh)
            .await?;

        *self.index.write().await = fresh;
        Ok(report)
    }

    /// Nearest chunks for `query`
    pub async fn retrieve(&self, query: &str, top_k: usize) -> RagResult<Vec<SearchResult>> {
        let vector = self.gateway.embed_text(query).await?;
        self.index.read().await.search(&vector, top_k)
    }

    /// Nearest chunks for `query`, rendered as one context string
    pub async fn retrieve_context(&self, query: &str, top_k: usize) -> RagResult<String> {
        let results = self.retrieve(query, top_k).await?;
        Ok(self.assembler.render(&results))
    }

    /// Answer one chat message from `user_id` using the configured `top_k`.
    pub async fn submit_query(&self, user_id: &str, message: &str) -> RagResult<QueryResponse> {
        self.submit_query_with(user_id, message, self.top_k).await
    }

    /// Answer one chat message with an explicit retrieval depth.
    pub async fn submit_query_with(
        &self,
        user_id: &str,
        message: &str,
        top_k: usize,
    ) -> RagResult<QueryResponse> {
        let message = message.trim();
        if message.is_empty() {
            return Err(RagError::InvalidInput("message cannot be empty".to_string()));
        }

        let query_id = Uuid::new_v4();
        tracing::info!(%query_id, user_id, chars = message.chars().count(), "query received");

        let context = self.retrieve_context(message, top_k).await.inspect_err(|e| {
            tracing::error!(%query_id, error = %e, "retrieval failed");
        })?;
        if context.is_empty() {
            tracing::warn!(%query_id, "no indexed context for query");
        }

        let completion = self
            .gateway
            .complete_with_context(message, &context)
            .await
            .inspect_err(|e| {
                tracing::error!(%query_id, error = %e, "generation failed");
            })?;

        tracing::info!(%query_id, provider = %completion.provider, "query answered");
        Ok(QueryResponse {
            response_text: completion.text,
            provider_name: completion.provider,
        })
    }

    /// Totals for the current index
    pub async fn get_index_stats(&self) -> IndexStats {
        self.index.read().await.stats()
    }

    /// Provider availability snapshot
    pub fn get_provider_status(&self) -> ProviderStatus {
        self.gateway.get_provider_status()
    }

    /// The provider gateway
    pub fn gateway(&self) -> &Arc<ProviderGateway> {
        &self.gateway
    }

    /// Configured corpus folder
    pub fn documents_dir(&self) -> &std::path::Path {
        &self.documents_dir
    }
}
