//! Model provider port for embeddings and text generation.
//!
//! A provider wraps one remote service that can both embed text and answer a
//! prompt. The gateway composes providers into a primary/fallback chain.

use async_trait::async_trait;

use crate::domain::errors::ProviderError;

/// Trait for remote model providers (Gemini, OpenAI, test doubles).
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Human-readable provider name (e.g., "Google Gemini", "OpenAI").
    fn name(&self) -> &str;

    /// Generate an embedding vector for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;

    /// Generate a free-text answer for a fully assembled prompt.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
