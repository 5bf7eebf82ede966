//! Layered configuration loading and validation

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::ProviderKind;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Log level is not one of trace/debug/info/warn/error
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Chunk size below 1
    #[error("Invalid chunk_size: {0}. Must be at least 1")]
    InvalidChunkSize(usize),

    /// top_k below 1
    #[error("Invalid top_k: {0}. Must be at least 1")]
    InvalidTopK(usize),

    /// Embedding dimension below 1
    #[error("Invalid embedding dimension: {0}. Must be at least 1")]
    InvalidDimension(usize),

    /// Empty documents directory
    #[error("Documents directory cannot be empty")]
    EmptyDocumentsDir,

    /// Empty extension list
    #[error("At least one document extension must be configured")]
    NoExtensions,

    /// A provider listed twice in the priority order
    #[error("Provider '{0}' appears more than once in providers.priority")]
    DuplicateProvider(ProviderKind),
}

/// Project config file, relative to the working directory
pub const CONFIG_FILE: &str = "ragchat.yaml";

/// Optional local overrides, kept out of version control
pub const LOCAL_CONFIG_FILE: &str = "ragchat.local.yaml";

const ENV_PREFIX: &str = "RAGCHAT_";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. ragchat.yaml
    /// 3. ragchat.local.yaml (optional)
    /// 4. Environment variables (RAGCHAT_* prefix, `__` separates levels)
    ///
    /// Provider keys still unset afterwards are taken from `GOOGLE_API_KEY`
    /// and `OPENAI_API_KEY`.
    pub fn load() -> Result<Config> {
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::apply_credential_fallbacks(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let mut config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::apply_credential_fallbacks(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Fill blank provider keys from their conventional env variables
    pub fn apply_credential_fallbacks(config: &mut Config) {
        for kind in ProviderKind::DEFAULT_PRIORITY {
            if config.providers.api_key(kind).is_some() {
                continue;
            }
            let Ok(value) = std::env::var(kind.api_key_env()) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            match kind {
                ProviderKind::Google => config.providers.google.api_key = Some(value),
                ProviderKind::OpenAi => config.providers.openai.api_key = Some(value),
            }
        }
    }

    /// Validate configuration after loading
    ///
    /// `chunk_overlap` is not checked: an overlap at or above the chunk size
    /// only produces near-duplicate chunks.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.chunking.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(config.chunking.chunk_size));
        }

        if config.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidTopK(config.retrieval.top_k));
        }

        if config.retrieval.dimension == 0 {
            return Err(ConfigError::InvalidDimension(config.retrieval.dimension));
        }

        if config.corpus.documents_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDocumentsDir);
        }

        if config
            .corpus
            .extensions
            .iter()
            .all(|ext| ext.trim_start_matches('.').trim().is_empty())
        {
            return Err(ConfigError::NoExtensions);
        }

        let mut seen = HashSet::new();
        for kind in &config.providers.priority {
            if !seen.insert(kind) {
                return Err(ConfigError::DuplicateProvider(*kind));
            }
        }

        Ok(())
    }
}
