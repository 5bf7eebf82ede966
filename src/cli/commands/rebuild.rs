//! Implementation of the `ragchat rebuild` command.
//!
//! Rebuilds the index with explicit chunking parameters, then runs a probe
//! search so retrieval quality can be eyeballed after tuning.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::{build_index, build_service};
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Config, IndexStats, LoadReport, SearchResult};
use crate::infrastructure::config::ConfigLoader;

/// Arguments for `ragchat rebuild`
#[derive(Args, Debug)]
pub struct RebuildArgs {
    /// Documents folder (defaults to corpus.documents_dir)
    #[arg(long, value_name = "DIR")]
    pub docs: Option<PathBuf>,

    /// Target chunk size in characters (defaults to chunking.chunk_size)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between chunks in characters (defaults to chunking.chunk_overlap)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Print index statistics after the rebuild
    #[arg(long)]
    pub show_stats: bool,

    /// Query used to probe the rebuilt index; empty to skip
    #[arg(long, default_value = "API documentation")]
    pub probe_query: String,

    /// Results shown for the probe query
    #[arg(long, default_value_t = 2)]
    pub probe_top_k: usize,
}

/// Result of a rebuild
#[derive(Debug, Serialize)]
pub struct RebuildOutput {
    /// Folder the corpus was read from
    pub documents_dir: PathBuf,
    /// Chunk size used for this build
    pub chunk_size: usize,
    /// Chunk overlap used for this build
    pub chunk_overlap: usize,
    /// Files indexed and skipped
    pub report: LoadReport,
    /// Index statistics, present with `--show-stats`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<IndexStats>,
    /// Probe search results, absent when the probe query is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeOutput>,
}

/// Nearest chunks for the probe query
#[derive(Debug, Serialize)]
pub struct ProbeOutput {
    /// Query text that was embedded
    pub query: String,
    /// Hits in ascending distance order
    pub results: Vec<SearchResult>,
}

impl CommandOutput for RebuildOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        let mut lines = vec![format!(
            "Rebuilt index from {} (chunk_size={}, chunk_overlap={}): {} chunks from {} files",
            self.documents_dir.display(),
            self.chunk_size,
            self.chunk_overlap,
            self.report.chunks_added,
            self.report.files_indexed
        )];

        for skipped in &self.report.skipped {
            lines.push(format!("  skipped {}: {}", skipped.filename, skipped.reason));
        }

        if let Some(stats) = &self.stats {
            lines.push(String::new());
            lines.push(formatter.format_index_stats(stats));
        }

        if let Some(probe) = &self.probe {
            lines.push(String::new());
            lines.push(format!("Probe: \"{}\"", probe.query));
            if probe.results.is_empty() {
                lines.push("  no results".to_string());
            } else {
                lines.push(formatter.format_search_results(&probe.results));
            }
        }

        lines.join("\n")
    }
}

/// Rebuild the index with the requested chunking and run the probe search.
pub async fn execute(args: RebuildArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mut config = config.clone();
    if let Some(docs) = args.docs {
        config.corpus.documents_dir = docs;
    }
    if let Some(size) = args.chunk_size {
        config.chunking.chunk_size = size;
    }
    if let Some(overlap) = args.chunk_overlap {
        config.chunking.chunk_overlap = overlap;
    }
    ConfigLoader::validate(&config)?;

    let service = build_service(&config)?;
    let report = build_index(&service, json_mode).await?;

    let stats = if args.show_stats {
        Some(service.get_index_stats().await)
    } else {
        None
    };

    let query = args.probe_query.trim();
    let probe = if query.is_empty() || args.probe_top_k == 0 {
        None
    } else {
        let results = service
            .retrieve(query, args.probe_top_k)
            .await
            .context("Probe search failed")?;
        Some(ProbeOutput {
            query: query.to_string(),
            results,
        })
    };

    output(
        &RebuildOutput {
            documents_dir: config.corpus.documents_dir.clone(),
            chunk_size: config.chunking.chunk_size,
            chunk_overlap: config.chunking.chunk_overlap,
            report,
            stats,
            probe,
        },
        json_mode,
    );
    Ok(())
}
