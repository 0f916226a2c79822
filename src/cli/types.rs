use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::output::IssueLayout;
use crate::domain::models::AnalysisType;

/// Repository analysed when no URL is given.
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/neovim/neovim";

#[derive(Parser)]
#[command(name = "issuepulse")]
#[command(about = "Sentiment and emotion analysis of GitHub issues", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch recent issues of a repository and classify them
    Analyze(AnalyzeArgs),

    /// Serve the analysis pipeline over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// GitHub repository URL
    #[arg(default_value = DEFAULT_REPOSITORY_URL)]
    pub github_url: String,

    /// Choose between sentiment or emotion analysis
    #[arg(short, long, default_value = "sentiment")]
    pub model_choice: AnalysisType,

    /// Use example URL https://github.com/neovim/neovim
    #[arg(short, long)]
    pub example: bool,

    /// GitHub repository owner (requires --repo)
    #[arg(short, long, requires = "repo")]
    pub owner: Option<String>,

    /// GitHub repository name (requires --owner)
    #[arg(short, long, requires = "owner")]
    pub repo: Option<String>,

    /// Format output to more readable text
    #[arg(short, long, value_enum, default_value = "yes")]
    pub format: IssueLayout,

    /// Number of issues to analyze
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub number: u16,

    /// Also write the formatted results to a text file
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Also write the results to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// URL to analyse, honouring `--example`.
    pub fn effective_url(&self) -> &str {
        if self.example {
            DEFAULT_REPOSITORY_URL
        } else {
            self.github_url.trim()
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to server.host from configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to server.port from configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}
