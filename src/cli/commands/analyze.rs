//! Implementation of the `issuepulse analyze` command.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::cli::output::export::{save_to_csv, save_to_text};
use crate::cli::output::{output, CliProgress, ReportOutput};
use crate::cli::types::AnalyzeArgs;
use crate::domain::models::{Config, RepositoryRef};
use crate::domain::ports::HttpTransport;
use crate::infrastructure::github::ReqwestTransport;
use crate::infrastructure::inference::CapabilityRegistry;
use crate::services::{AnalysisService, Classifier, IssueFetcher, MAX_PAGE_SIZE};

pub async fn execute(args: AnalyzeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let transport: Arc<dyn HttpTransport> = Arc::new(
        ReqwestTransport::from_config(&config.github).context("Failed to create GitHub client")?,
    );
    let registry = CapabilityRegistry::hosted(config.classifier.clone());
    run(args, config, transport, &registry, json_mode).await
}

/// Analysis with injected transport and capabilities.
pub async fn run(
    args: AnalyzeArgs,
    config: &Config,
    transport: Arc<dyn HttpTransport>,
    registry: &CapabilityRegistry,
    json_mode: bool,
) -> Result<()> {
    let url = args.effective_url();
    let repository = RepositoryRef::resolve(url, args.owner.as_deref(), args.repo.as_deref())?;
    info!(url, owner = %repository.owner, repo = %repository.repo, "resolved repository");

    let capability = registry
        .get(args.model_choice)
        .await
        .context("Failed to load classification model")?;

    let service = AnalysisService::new(
        IssueFetcher::from_config(transport, &config.github),
        Classifier::new(capability),
        args.model_choice,
        config.classifier.failure_policy,
    );

    let target = usize::from(args.number);
    let progress = if json_mode {
        CliProgress::hidden(target)
    } else {
        CliProgress::new(target)
    };
    let result = service
        .analyze(&repository, target, MAX_PAGE_SIZE, &progress)
        .await;
    progress.finish();

    let report = result.with_context(|| format!("Analysis of {repository} failed"))?;
    if report.issues.is_empty() {
        bail!("No issues found for {repository}.");
    }

    if let Some(path) = &args.output_file {
        save_to_text(&report, path)?;
        info!(path = %path.display(), "wrote text report");
    }
    if let Some(path) = &args.csv {
        save_to_csv(&report, path)?;
        info!(path = %path.display(), "wrote CSV report");
    }

    output(&ReportOutput::new(report, args.format), json_mode);
    Ok(())
}
