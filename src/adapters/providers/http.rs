//! Shared HTTP plumbing for the provider adapters.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::errors::ProviderError;
use crate::infrastructure::logging::scrub;

/// Longest error body kept in a `ProviderError`, in characters.
const MAX_ERROR_BODY: usize = 500;

/// `{"error": {"message": ...}}`, the envelope both Gemini and OpenAI use.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::ClientInit(e.to_string()))
}

/// Pass successful responses through; turn anything else into a
/// `ProviderError` carrying the scrubbed upstream message.
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read response body".to_string());
    let message = error_message(&body);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication {
            status: status.as_u16(),
            message,
        },
        _ => ProviderError::Http {
            status: status.as_u16(),
            message,
        },
    })
}

fn error_message(body: &str) -> String {
    let raw = serde_json::from_str::<ErrorEnvelope>(body)
        .map_or_else(|_| body.trim().to_string(), |envelope| envelope.error.message);
    let scrubbed = scrub(&raw);
    match scrubbed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &scrubbed[..cut]),
        None => scrubbed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_envelope() {
        let body = r#"{"error": {"code": 400, "message": "model not found", "status": "NOT_FOUND"}}"#;
        assert_eq!(error_message(body), "model not found");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_error_message_is_truncated_and_scrubbed() {
        let long = "x".repeat(800);
        assert_eq!(error_message(&long).chars().count(), MAX_ERROR_BODY + 3);

        let leaked = r#"{"error": {"message": "Incorrect API key provided: sk-abcdefghijklmnopqrstuv"}}"#;
        assert!(!error_message(leaked).contains("sk-abcdefghijklmnopqrstuv"));
    }
}
