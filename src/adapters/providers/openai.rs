//! OpenAI provider adapter.
//!
//! Embeddings via `/embeddings` (with `dimensions` pinned so vectors match
//! the index) and chat via `/chat/completions`. Compatible with any
//! OpenAI-compatible endpoint through `base_url`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http::{build_client, check_status};
use crate::domain::errors::ProviderError;
use crate::domain::models::{OpenAiSettings, ProviderKind};
use crate::domain::ports::ModelProvider;

/// System message sent ahead of every chat prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful company assistant.";

/// OpenAI provider.
pub struct OpenAiProvider {
    api_key: String,
    settings: OpenAiSettings,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Builds the client; fails only if the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>, settings: OpenAiSettings) -> Result<Self, ProviderError> {
        let client = build_client(settings.timeout_secs)?;
        Ok(Self {
            api_key: api_key.into(),
            settings,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.base_url.trim_end_matches('/'))
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        check_status(response).await
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &str {
        ProviderKind::OpenAi.display_name()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let request = EmbeddingsRequest {
            model: &self.settings.embedding_model,
            input: text,
            dimensions: self.settings.embedding_dimensions,
        };

        let response: EmbeddingsResponse = self
            .post("embeddings", &request)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.settings.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response: ChatResponse = self
            .post("chat/completions", &request)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
