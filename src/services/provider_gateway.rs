//! Provider gateway
//!
//! Routes embedding and generation calls to the highest-priority available
//! provider and retries a failed call exactly once against the next one.
//! There is no backoff and never more than one fallback hop.

use std::fmt;
use std::sync::Arc;

use crate::adapters::providers::build_provider;
use crate::domain::errors::{ProviderError, RagError, RagResult};
use crate::domain::models::{
    Completion, ProviderAvailability, ProviderKind, ProviderStatus, ProvidersConfig,
};
use crate::domain::ports::ModelProvider;

/// Primary plus one fallback
const MAX_CHAIN_LEN: usize = 2;

const PERSONA: &str = "You are a helpful assistant speaking on behalf of our company. \
Answer in the first person as the company itself, never as an AI or a language model. \
Do not mention \"the context\" or say things like \"based on the provided text\". \
If the answer is not in the information below, reply politely and stay in character as the company.";

/// Build the persona-constrained prompt sent to every provider
pub fn build_prompt(prompt: &str, context: &str) -> String {
    format!("{PERSONA}\n\nContext:\n{context}\n\nUser: {prompt}\nCompany Assistant:")
}

#[derive(Debug)]
struct ProviderSlot {
    name: String,
    credential_set: bool,
    available: bool,
}

/// Strategy chain over remote model providers.
pub struct ProviderGateway {
    chain: Vec<Arc<dyn ModelProvider>>,
    slots: Vec<ProviderSlot>,
}

impl ProviderGateway {
    /// Build the chain from configuration.
    ///
    /// Providers are tried in `priority` order; those without a non-empty
    /// key, or whose client failed to build, are left out. Fails before any
    /// network call when nothing is left.
    pub fn from_config(config: &ProvidersConfig) -> RagResult<Self> {
        let mut order: Vec<ProviderKind> = Vec::new();
        for kind in config
            .priority
            .iter()
            .chain(ProviderKind::DEFAULT_PRIORITY.iter())
        {
            if !order.contains(kind) {
                order.push(*kind);
            }
        }

        let mut chain: Vec<Arc<dyn ModelProvider>> = Vec::new();
        let mut slots = Vec::with_capacity(order.len());

        for kind in order {
            let credential_set = config.api_key(kind).is_some();
            let prioritized = config.priority.contains(&kind);

            let provider = if prioritized && chain.len() < MAX_CHAIN_LEN {
                match build_provider(kind, config) {
                    Ok(provider) => provider,
                    Err(e) => {
                        tracing::error!(
                            provider = kind.display_name(),
                            error = %e,
                            "failed to initialize provider client"
                        );
                        None
                    }
                }
            } else {
                None
            };

            slots.push(ProviderSlot {
                name: kind.display_name().to_string(),
                credential_set,
                available: provider.is_some(),
            });
            if let Some(provider) = provider {
                chain.push(provider);
            }
        }

        if chain.is_empty() {
            return Err(RagError::Configuration(format!(
                "no model provider available: set {} or {}",
                ProviderKind::Google.api_key_env(),
                ProviderKind::OpenAi.api_key_env()
            )));
        }

        let gateway = Self { chain, slots };
        tracing::info!(
            active = gateway.get_active_provider(),
            fallback = gateway.fallback_name().unwrap_or("none"),
            "provider gateway ready"
        );
        Ok(gateway)
    }

    /// Build a gateway over explicit providers, in priority order.
    pub fn new(providers: Vec<Arc<dyn ModelProvider>>) -> RagResult<Self> {
        if providers.is_empty() {
            return Err(RagError::Configuration(
                "at least one model provider is required".to_string(),
            ));
        }

        let slots = providers
            .iter()
            .enumerate()
            .map(|(i, p)| ProviderSlot {
                name: p.name().to_string(),
                credential_set: true,
                available: i < MAX_CHAIN_LEN,
            })
            .collect();

        let mut chain = providers;
        chain.truncate(MAX_CHAIN_LEN);
        Ok(Self { chain, slots })
    }

    /// Embed `text`, falling back once on failure.
    pub async fn embed_text(&self, text: &str) -> RagResult<Vec<f32>> {
        let mut last_failure: Option<(String, ProviderError)> = None;

        for (attempt, provider) in self.chain.iter().enumerate() {
            let name = provider.name();
            if attempt > 0 {
                tracing::info!(provider = name, "falling back to {name} for embedding");
            }
            tracing::debug!(provider = name, chars = text.chars().count(), "requesting embedding");

            match provider.embed(text).await {
                Ok(vector) => return Ok(vector),
                Err(e) => {
                    log_failure(name, "embedding", &e);
                    last_failure = Some((name.to_string(), e));
                }
            }
        }

        Err(match last_failure {
            Some((provider, source)) => RagError::Embedding { provider, source },
            None => self.empty_chain(),
        })
    }

    /// Generate an answer for `prompt` grounded in `context`.
    pub async fn chat_with_context(&self, prompt: &str, context: &str) -> RagResult<String> {
        self.complete_with_context(prompt, context)
            .await
            .map(|completion| completion.text)
    }

    /// Like [`Self::chat_with_context`], also naming the provider that answered.
    pub async fn complete_with_context(
        &self,
        prompt: &str,
        context: &str,
    ) -> RagResult<Completion> {
        let full_prompt = build_prompt(prompt, context);
        let mut last_failure: Option<(String, ProviderError)> = None;

        for (attempt, provider) in self.chain.iter().enumerate() {
            let name = provider.name();
            if attempt > 0 {
                tracing::info!(provider = name, "falling back to {name} for generation");
            }
            tracing::debug!(provider = name, "requesting completion");

            match provider.complete(&full_prompt).await {
                Ok(text) => {
                    return Ok(Completion {
                        text,
                        provider: name.to_string(),
                    })
                }
                Err(e) => {
                    log_failure(name, "generation", &e);
                    last_failure = Some((name.to_string(), e));
                }
            }
        }

        Err(match last_failure {
            Some((provider, source)) => RagError::Generation { provider, source },
            None => self.empty_chain(),
        })
    }

    /// Name of the primary provider
    pub fn get_active_provider(&self) -> &str {
        self.chain.first().map_or("None", |p| p.name())
    }

    /// Name of the fallback provider, if the chain has one
    pub fn fallback_name(&self) -> Option<&str> {
        self.chain.get(1).map(|p| p.name())
    }

    /// Diagnostic snapshot of every known provider
    pub fn get_provider_status(&self) -> ProviderStatus {
        ProviderStatus {
            providers: self
                .slots
                .iter()
                .map(|slot| ProviderAvailability {
                    name: slot.name.clone(),
                    credential_set: slot.credential_set,
                    available: slot.available,
                })
                .collect(),
            active_provider: self.get_active_provider().to_string(),
        }
    }

    fn empty_chain(&self) -> RagError {
        RagError::Configuration(format!(
            "no model provider available ({} configured)",
            self.slots.len()
        ))
    }
}

impl fmt::Debug for ProviderGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<&str> = self.chain.iter().map(|p| p.name()).collect();
        f.debug_struct("ProviderGateway")
            .field("chain", &chain)
            .field("slots", &self.slots)
            .finish()
    }
}

fn log_failure(provider: &str, operation: &str, error: &ProviderError) {
    if error.is_auth() {
        tracing::error!(provider, operation, error = %error, "provider rejected credentials");
    } else {
        tracing::warn!(provider, operation, error = %error, "provider call failed");
    }
}
