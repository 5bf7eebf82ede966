//! Implementation of the `ragchat stats` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::{build_index, build_service};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, IndexStats, SkippedFile};

/// Arguments for `ragchat stats`
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Documents folder (defaults to corpus.documents_dir)
    #[arg(long, value_name = "DIR")]
    pub docs: Option<PathBuf>,
}

/// Index statistics after a fresh load
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    /// Folder the corpus was read from
    pub documents_dir: PathBuf,
    /// Chunk and file totals
    #[serde(flatten)]
    pub stats: IndexStats,
    /// Files left out of the index
    pub skipped: Vec<SkippedFile>,
}

impl CommandOutput for StatsOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Documents: {}", self.documents_dir.display()),
            TableFormatter::new().format_index_stats(&self.stats),
        ];
        for skipped in &self.skipped {
            lines.push(format!("  skipped {}: {}", skipped.filename, skipped.reason));
        }
        lines.join("\n")
    }
}

/// Load the corpus and report what the index holds.
pub async fn execute(args: StatsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut config = config.clone();
    if let Some(docs) = args.docs {
        config.corpus.documents_dir = docs;
    }

    let service = build_service(&config)?;
    let report = build_index(&service, json_mode).await?;

    output(
        &StatsOutput {
            documents_dir: config.corpus.documents_dir.clone(),
            stats: service.get_index_stats().await,
            skipped: report.skipped,
        },
        json_mode,
    );
    Ok(())
}
