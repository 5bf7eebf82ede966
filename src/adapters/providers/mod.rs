//! Model provider adapters.

pub mod gemini;
mod http;
pub mod mock;
pub mod openai;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;

use std::sync::Arc;

use crate::domain::errors::ProviderError;
use crate::domain::models::{ProviderKind, ProvidersConfig};
use crate::domain::ports::ModelProvider;

/// Build the adapter for `kind` from configuration.
///
/// Returns `Ok(None)` when no credential is configured for it.
pub fn build_provider(
    kind: ProviderKind,
    config: &ProvidersConfig,
) -> Result<Option<Arc<dyn ModelProvider>>, ProviderError> {
    let Some(api_key) = config.api_key(kind) else {
        return Ok(None);
    };

    let provider: Arc<dyn ModelProvider> = match kind {
        ProviderKind::Google => Arc::new(GeminiProvider::new(api_key, config.google.clone())?),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(api_key, config.openai.clone())?),
    };
    Ok(Some(provider))
}
