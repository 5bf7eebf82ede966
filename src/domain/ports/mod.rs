//! Port trait definitions (Hexagonal Architecture)
//!
//! - ModelProvider: remote embedding and generation services
//! - ChunkingService: document splitting
//!
//! Adapters in `crate::adapters` and `crate::infrastructure` implement these so
//! the services stay independent of any particular vendor.

pub mod chunking;
pub mod model_provider;

pub use chunking::ChunkingService;
pub use model_provider::ModelProvider;
