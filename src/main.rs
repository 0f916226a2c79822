//! issuepulse CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use issuepulse::cli::{commands, Cli, Commands};
use issuepulse::infrastructure::logging::{LogConfig, LoggerImpl};
use issuepulse::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        issuepulse::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;

    let mut log_config = LogConfig::try_from(&config.logging)?;
    log_config = match cli.verbose {
        0 => log_config,
        1 => log_config.with_level("info"),
        2 => log_config.with_level("debug"),
        _ => log_config.with_level("trace"),
    };
    let _logger = LoggerImpl::init(&log_config)?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &config, cli.json).await,
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
    }
}
