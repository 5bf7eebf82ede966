//! Implementation of the `ragchat ask` command.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::commands::{build_index, build_service};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

/// Arguments for `ragchat ask`
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to answer
    pub message: String,

    /// Caller identity recorded in logs
    #[arg(short, long, default_value = "cli")]
    pub user: String,

    /// Chunks of context to retrieve (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Answer printed by `ragchat ask`
#[derive(Debug, Serialize)]
pub struct AskOutput {
    /// Generated answer
    pub response_text: String,
    /// Provider that produced the answer
    pub provider_name: String,
}

impl CommandOutput for AskOutput {
    fn to_human(&self) -> String {
        format!(
            "{}\n\n{}",
            self.response_text.trim(),
            console::style(format!("answered by {}", self.provider_name)).dim()
        )
    }
}

/// Index the corpus, then answer one question.
pub async fn execute(args: AskArgs, config: &Config, json_mode: bool) -> Result<()> {
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);
    if top_k == 0 {
        bail!("--top-k must be at least 1");
    }

    let service = build_service(config)?;
    build_index(&service, json_mode).await?;

    let response = service
        .submit_query_with(&args.user, &args.message, top_k)
        .await
        .context("Failed to answer the question")?;

    output(
        &AskOutput {
            response_text: response.response_text,
            provider_name: response.provider_name,
        },
        json_mode,
    );
    Ok(())
}
