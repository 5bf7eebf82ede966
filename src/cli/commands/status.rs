//! Implementation of the `ragchat status` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::commands::build_service;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, ProviderAvailability, ProviderKind, ProviderStatus};
use crate::services::{ChatService, IndexInit};

/// Arguments for `ragchat status`
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show configuration; skip the live provider calls
    #[arg(long)]
    pub offline: bool,
}

/// Result of one live provider call
#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    /// The call succeeded
    pub ok: bool,
    /// Reply excerpt or error message
    pub detail: String,
}

/// Provider configuration plus optional live checks
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    /// Configuration-derived availability
    pub status: ProviderStatus,
    /// Result of a short completion call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_check: Option<CheckOutcome>,
    /// Result of a short embedding call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_check: Option<CheckOutcome>,
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            TableFormatter::new().format_provider_status(&self.status),
            format!("Active provider: {}", self.status.active_provider),
        ];

        for (label, check) in [
            ("Chat", &self.chat_check),
            ("Embedding", &self.embedding_check),
        ] {
            if let Some(check) = check {
                let mark = if check.ok {
                    console::style("✓").green()
                } else {
                    console::style("✗").red()
                };
                lines.push(format!("{mark} {label}: {}", check.detail));
            }
        }
        lines.join("\n")
    }
}

/// Print provider status and, unless `--offline`, test each operation.
pub async fn execute(args: StatusArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = match build_service(config) {
        Ok(service) => service,
        Err(err) => {
            // Still show which credentials are missing before failing
            output(
                &StatusOutput {
                    status: unconfigured_status(config),
                    chat_check: None,
                    embedding_check: None,
                },
                json_mode,
            );
            return Err(err);
        }
    };
    // Diagnostics need only the gateway; the corpus is never read or embedded
    service.initialize(IndexInit::Deferred).await?;

    let (chat_check, embedding_check) = if args.offline {
        (None, None)
    } else {
        let (chat, embedding) = connectivity_checks(&service).await;
        (Some(chat), Some(embedding))
    };

    let failed = [&chat_check, &embedding_check]
        .iter()
        .any(|check| check.as_ref().is_some_and(|c| !c.ok));

    output(
        &StatusOutput {
            status: service.get_provider_status(),
            chat_check,
            embedding_check,
        },
        json_mode,
    );

    if failed {
        anyhow::bail!("provider connectivity check failed");
    }
    Ok(())
}

async fn connectivity_checks(service: &ChatService) -> (CheckOutcome, CheckOutcome) {
    let gateway = service.gateway();

    let chat = match gateway.complete_with_context("Hello", "Test context").await {
        Ok(completion) => CheckOutcome {
            ok: true,
            detail: format!(
                "{} replied: {}",
                completion.provider,
                crate::cli::output::table::truncate_text(completion.text.trim(), 80)
            ),
        },
        Err(e) => CheckOutcome {
            ok: false,
            detail: format!("{:#}", anyhow::Error::new(e)),
        },
    };

    let embedding = match gateway
        .embed_text("Test text")
        .await
        .context("embedding request failed")
    {
        Ok(vector) => CheckOutcome {
            ok: true,
            detail: format!("dimension {}", vector.len()),
        },
        Err(e) => CheckOutcome {
            ok: false,
            detail: format!("{e:#}"),
        },
    };

    (chat, embedding)
}

/// Status derived from configuration alone, for when no gateway could be built
fn unconfigured_status(config: &Config) -> ProviderStatus {
    ProviderStatus {
        providers: ProviderKind::DEFAULT_PRIORITY
            .iter()
            .map(|kind| ProviderAvailability {
                name: kind.display_name().to_string(),
                credential_set: config.providers.api_key(*kind).is_some(),
                available: false,
            })
            .collect(),
        active_provider: "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_status() {
        let status = unconfigured_status(&Config::default());
        assert_eq!(status.active_provider, "None");
        assert_eq!(status.providers.len(), 2);
        assert!(status.providers.iter().all(|p| !p.available && !p.credential_set));
    }

    #[test]
    fn test_status_output_human() {
        let out = StatusOutput {
            status: unconfigured_status(&Config::default()),
            chat_check: Some(CheckOutcome {
                ok: false,
                detail: "timeout".to_string(),
            }),
            embedding_check: None,
        };
        let text = out.to_human();
        assert!(text.contains("Active provider: None"));
        assert!(text.contains("Chat: timeout"));
        assert!(!text.contains("Embedding:"));
    }
}
