//! Domain layer for ragchat
//!
//! Core models, error types and the ports the services depend on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ProviderError, RagError, RagResult};
