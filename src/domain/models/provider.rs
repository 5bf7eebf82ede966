//! Model provider domain models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remote embedding/generation services the gateway knows how to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Google Gemini (generativelanguage API)
    Google,
    /// OpenAI
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// Default priority: Google first, OpenAI as fallback
    pub const DEFAULT_PRIORITY: [Self; 2] = [Self::Google, Self::OpenAi];

    /// Human-readable provider name reported to callers
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google Gemini",
            Self::OpenAi => "OpenAI",
        }
    }

    /// Conventional environment variable holding the credential
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::Google => "GOOGLE_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    /// Lowercase name used in config and logs
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "gemini" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

/// Availability of one provider slot in the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAvailability {
    /// Provider name
    pub name: String,
    /// A non-empty credential was configured
    pub credential_set: bool,
    /// The provider is part of the strategy chain
    pub available: bool,
}

/// Diagnostic snapshot of the gateway, recomputed on every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// Every known provider, in priority order
    pub providers: Vec<ProviderAvailability>,
    /// Primary provider name, or `"None"`
    pub active_provider: String,
}

impl ProviderStatus {
    /// Whether `name` is in the chain
    pub fn is_available(&self, name: &str) -> bool {
        self.providers
            .iter()
            .any(|p| p.name == name && p.available)
    }
}

/// A generated answer and the provider that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text
    pub text: String,
    /// Provider that generated it
    pub provider: String,
}

/// Answer to one chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Answer text
    pub response_text: String,
    /// Provider that answered
    pub provider_name: String,
}
