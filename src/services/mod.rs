//! Application services: provider fallback, corpus loading, retrieval and chat

pub mod chat_service;
pub mod context_assembler;
pub mod corpus_loader;
pub mod provider_gateway;

pub use chat_service::{ChatService, IndexInit};
pub use context_assembler::ContextAssembler;
pub use corpus_loader::CorpusLoader;
pub use provider_gateway::ProviderGateway;
