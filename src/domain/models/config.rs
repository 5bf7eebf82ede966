//! Application configuration tree

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::chunking::ChunkingConfig;
use super::provider::ProviderKind;

/// Main configuration structure for ragchat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Model provider configuration
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Document chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Vector retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Document corpus configuration
    #[serde(default)]
    pub corpus: CorpusConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling JSON log files. Console only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation policy for file output
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Console log encoding
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Compact human-readable lines
    #[default]
    Pretty,
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file each day
    #[default]
    Daily,
    /// New file each hour
    Hourly,
    /// Single file, never rotated
    Never,
}

/// Model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProvidersConfig {
    /// Order in which providers are tried. Only the first two usable
    /// entries take part in the chain.
    #[serde(default = "default_priority")]
    pub priority: Vec<ProviderKind>,

    /// Gemini settings
    #[serde(default)]
    pub google: GoogleSettings,

    /// OpenAI settings
    #[serde(default)]
    pub openai: OpenAiSettings,
}

fn default_priority() -> Vec<ProviderKind> {
    ProviderKind::DEFAULT_PRIORITY.to_vec()
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            google: GoogleSettings::default(),
            openai: OpenAiSettings::default(),
        }
    }
}

impl ProvidersConfig {
    /// Configured credential for a provider, if non-empty
    pub fn api_key(&self, kind: ProviderKind) -> Option<&str> {
        let key = match kind {
            ProviderKind::Google => self.google.api_key.as_deref(),
            ProviderKind::OpenAi => self.openai.api_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Google Gemini settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GoogleSettings {
    /// API key (falls back to `GOOGLE_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// REST endpoint root
    #[serde(default = "default_google_base_url")]
    pub base_url: String,

    /// Model used for embeddings
    #[serde(default = "default_google_embedding_model")]
    pub embedding_model: String,

    /// Model used for completions
    #[serde(default = "default_google_chat_model")]
    pub chat_model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_google_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_google_embedding_model() -> String {
    "embedding-001".to_string()
}

fn default_google_chat_model() -> String {
    "gemini-1.5-flash".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_google_base_url(),
            embedding_model: default_google_embedding_model(),
            chat_model: default_google_chat_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// OpenAI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OpenAiSettings {
    /// API key (falls back to `OPENAI_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// REST endpoint root
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model used for embeddings
    #[serde(default = "default_openai_embedding_model")]
    pub embedding_model: String,

    /// Model used for completions
    #[serde(default = "default_openai_chat_model")]
    pub chat_model: String,

    /// Requested embedding width, kept equal to the index dimension so
    /// vectors from either provider stay comparable
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_openai_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_embedding_dimensions() -> usize {
    768
}

const fn default_max_tokens() -> u32 {
    1000
}

const fn default_temperature() -> f32 {
    0.7
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            embedding_model: default_openai_embedding_model(),
            chat_model: default_openai_chat_model(),
            embedding_dimensions: default_embedding_dimensions(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Vector retrieval configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Chunks retrieved per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Embedding dimension the index is created with
    #[serde(default = "default_embedding_dimensions")]
    pub dimension: usize,
}

const fn default_top_k() -> usize {
    4
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            dimension: default_embedding_dimensions(),
        }
    }
}

/// Document corpus configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CorpusConfig {
    /// Folder scanned (non-recursively) for documents
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// File extensions to load, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("documents")
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            extensions: default_extensions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(
            config.providers.priority,
            vec![ProviderKind::Google, ProviderKind::OpenAi]
        );
        assert_eq!(config.providers.openai.embedding_dimensions, 768);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.retrieval.dimension, 768);
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.corpus.documents_dir, PathBuf::from("documents"));
        assert_eq!(config.corpus.extensions, vec!["txt".to_string()]);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r"
providers:
  priority: [openai]
  openai:
    chat_model: gpt-4o
retrieval:
  top_k: 2
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.providers.priority, vec![ProviderKind::OpenAi]);
        assert_eq!(config.providers.openai.chat_model, "gpt-4o");
        assert_eq!(config.providers.openai.max_tokens, 1000);
        assert_eq!(config.retrieval.top_k, 2);
        assert_eq!(config.retrieval.dimension, 768);
        assert_eq!(config.providers.google.chat_model, "gemini-1.5-flash");
    }

    #[test]
    fn test_api_key_ignores_blank_values() {
        let mut providers = ProvidersConfig::default();
        assert_eq!(providers.api_key(ProviderKind::Google), None);

        providers.google.api_key = Some("   ".to_string());
        assert_eq!(providers.api_key(ProviderKind::Google), None);

        providers.openai.api_key = Some("sk-test".to_string());
        assert_eq!(providers.api_key(ProviderKind::OpenAi), Some("sk-test"));
    }
}
