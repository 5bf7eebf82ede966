//! Command handlers. Each exposes an `Args` struct and `execute`.

pub mod ask;
pub mod rebuild;
pub mod stats;
pub mod status;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cli::output::progress::{create_spinner, ProgressBarExt};
use crate::domain::models::{Config, LoadReport};
use crate::infrastructure::vector::SentenceChunker;
use crate::services::{ChatService, IndexInit, ProviderGateway};

/// Wire the gateway, chunker and chat service from configuration
pub(crate) fn build_service(config: &Config) -> Result<ChatService> {
    let gateway = ProviderGateway::from_config(&config.providers)
        .context("Failed to configure model providers")?;
    let chunker = SentenceChunker::new(config.chunking).context("Invalid chunking configuration")?;
    Ok(ChatService::new(Arc::new(gateway), Arc::new(chunker), config))
}

/// Build the index behind a spinner
pub(crate) async fn build_index(service: &ChatService, json_mode: bool) -> Result<LoadReport> {
    let spinner = create_spinner(
        format!("Indexing documents in {}", service.documents_dir().display()),
        !json_mode,
    );

    match service.initialize(IndexInit::Build).await {
        Ok(report) => {
            let report = report.unwrap_or_default();
            let summary = format!(
                "Indexed {} chunks from {} files",
                report.chunks_added, report.files_indexed
            );
            if report.skipped.is_empty() {
                spinner.finish_success(summary);
            } else {
                spinner.finish_warning(format!("{summary} ({} skipped)", report.skipped.len()));
            }
            Ok(report)
        }
        Err(e) => {
            spinner.finish_error("Indexing failed");
            Err(e).context("Failed to build the document index")
        }
    }
}
