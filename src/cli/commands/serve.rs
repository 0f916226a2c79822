//! Implementation of the `issuepulse serve` command.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::{AnalyzeHttpConfig, AnalyzeHttpServer, AppState};
use crate::cli::types::ServeArgs;
use crate::domain::models::Config;
use crate::infrastructure::github::ReqwestTransport;
use crate::infrastructure::inference::CapabilityRegistry;
use crate::services::IssueFetcher;

pub async fn execute(args: ServeArgs, config: &Config) -> Result<()> {
    let transport = Arc::new(
        ReqwestTransport::from_config(&config.github).context("Failed to create GitHub client")?,
    );

    let state = AppState {
        fetcher: IssueFetcher::from_config(transport, &config.github),
        registry: Arc::new(CapabilityRegistry::hosted(config.classifier.clone())),
        failure_policy: config.classifier.failure_policy,
    };
    let http_config = AnalyzeHttpConfig {
        host: args.host.unwrap_or_else(|| config.server.host.clone()),
        port: args.port.unwrap_or(config.server.port),
    };

    AnalyzeHttpServer::new(state, http_config)
        .serve_with_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
}
