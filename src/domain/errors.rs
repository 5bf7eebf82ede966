//! Domain errors for the ragchat retrieval pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a single remote model provider.
///
/// The gateway catches these per attempt; only the last one in the chain is
/// surfaced to callers, wrapped in [`RagError::Embedding`] or
/// [`RagError::Generation`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Credentials were rejected (401/403).
    #[error("authentication failed ({status}): {message}")]
    Authentication {
        /// HTTP status
        status: u16,
        /// Scrubbed upstream error message
        message: String,
    },

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// Any other non-success status.
    #[error("provider returned {status}: {message}")]
    Http {
        /// HTTP status
        status: u16,
        /// Scrubbed upstream error message
        message: String,
    },

    /// The body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The body parsed but carried no embedding or text.
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// The HTTP client could not be built.
    #[error("failed to initialize provider client: {0}")]
    ClientInit(String),
}

impl ProviderError {
    /// Returns true for credential problems (401/403).
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Errors surfaced by the retrieval pipeline to its callers.
#[derive(Debug, Error)]
pub enum RagError {
    /// No usable provider, or invalid settings.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Every provider in the chain failed to embed.
    #[error("embedding failed via {provider}: {source}")]
    Embedding {
        /// Last provider tried
        provider: String,
        /// Its failure
        #[source]
        source: ProviderError,
    },

    /// Every provider in the chain failed to generate.
    #[error("generation failed via {provider}: {source}")]
    Generation {
        /// Last provider tried
        provider: String,
        /// Its failure
        #[source]
        source: ProviderError,
    },

    /// A vector's length differs from the index dimension.
    #[error("embedding dimension mismatch: index expects {expected}, got {actual}")]
    DimensionMismatch {
        /// Index dimension
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// The caller sent something unusable, such as an empty message.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The documents folder is missing or not a directory.
    #[error("documents folder not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    /// Filesystem failure while reading the corpus.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl RagError {
    /// Whether the failure came from the remote providers rather than from
    /// local state. The outer layer maps these to "service unavailable".
    pub const fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Embedding { .. } | Self::Generation { .. })
    }
}

/// Result alias for pipeline operations.
pub type RagResult<T> = Result<T, RagError>;
