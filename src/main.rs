//! Ragchat CLI entry point.

use anyhow::Result;
use clap::Parser;

use ragchat::cli::commands::{ask, rebuild, stats, status};
use ragchat::cli::{Cli, Commands};
use ragchat::domain::models::Config;
use ragchat::infrastructure::logging::LoggerImpl;
use ragchat::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config.as_deref(), cli.json).await {
        ragchat::cli::handle_error(err, cli.json);
    }
}

async fn run(command: Commands, config_path: Option<&std::path::Path>, json: bool) -> Result<()> {
    let config: Config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    // Keep the guard alive so buffered file logs are flushed on exit
    let _logger = LoggerImpl::init(&config.logging)?;

    match command {
        Commands::Ask(args) => ask::execute(args, &config, json).await,
        Commands::Rebuild(args) => rebuild::execute(args, &config, json).await,
        Commands::Stats(args) => stats::execute(args, &config, json).await,
        Commands::Status(args) => status::execute(args, &config, json).await,
    }
}
