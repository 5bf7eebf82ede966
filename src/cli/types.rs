//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{ask::AskArgs, rebuild::RebuildArgs, stats::StatsArgs, status::StatusArgs};

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "ragchat")]
#[command(about = "Retrieval-augmented company chat over a local document corpus", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of ragchat.yaml
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question using the indexed documents
    Ask(AskArgs),

    /// Rebuild the vector index and probe it with a sample query
    Rebuild(RebuildArgs),

    /// Show index statistics
    Stats(StatsArgs),

    /// Show provider configuration and test connectivity
    Status(StatusArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ragchat", "stats", "--json", "--config", "alt.yaml"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn test_parse_rebuild_defaults() {
        let cli = Cli::try_parse_from(["ragchat", "rebuild", "--show-stats"]).unwrap();
        let Commands::Rebuild(args) = cli.command else {
            panic!("expected rebuild");
        };
        assert!(args.show_stats);
        assert_eq!(args.chunk_size, None);
        assert_eq!(args.probe_query, "API documentation");
        assert_eq!(args.probe_top_k, 2);
    }

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["ragchat", "ask", "What do you sell?", "-k", "2"]).unwrap();
        let Commands::Ask(args) = cli.command else {
            panic!("expected ask");
        };
        assert_eq!(args.message, "What do you sell?");
        assert_eq!(args.user, "cli");
        assert_eq!(args.top_k, Some(2));
    }
}
