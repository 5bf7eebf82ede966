//! Google Gemini provider adapter.
//!
//! Talks to the Generative Language REST API: `:embedContent` for
//! embeddings and `:generateContent` for chat. The key travels in the
//! `x-goog-api-key` header, never in the URL.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::http::{build_client, check_status};
use crate::domain::errors::ProviderError;
use crate::domain::models::{GoogleSettings, ProviderKind};
use crate::domain::ports::ModelProvider;

/// Google Gemini provider.
pub struct GeminiProvider {
    api_key: String,
    settings: GoogleSettings,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Builds the client; fails only if the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>, settings: GoogleSettings) -> Result<Self, ProviderError> {
        let client = build_client(settings.timeout_secs)?;
        Ok(Self {
            api_key: api_key.into(),
            settings,
            client,
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/{}:{}",
            self.settings.base_url.trim_end_matches('/'),
            model_path(model),
            method
        )
    }

    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

/// Gemini wants fully qualified `models/<name>` resource names.
fn model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn name(&self) -> &str {
        ProviderKind::Google.display_name()
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let model = &self.settings.embedding_model;
        let request = EmbedContentRequest {
            model: model_path(model),
            content: Content::user_text(text),
        };

        let response: EmbedContentResponse = self
            .post(&self.endpoint(model, "embedContent"), &request)
            .await?;

        let values = response
            .embedding
            .map(|e| e.values)
            .unwrap_or_default();
        if values.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(values)
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
        };

        let response: GenerateContentResponse = self
            .post(
                &self.endpoint(&self.settings.chat_model, "generateContent"),
                &request,
            )
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}

// Wire types

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: Option<ContentEmbedding>,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
