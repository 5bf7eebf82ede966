//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading
//! - Environment variable overrides
//! - Credential fallback to the conventional provider variables
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
