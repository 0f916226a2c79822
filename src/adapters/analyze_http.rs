//! Analysis HTTP Server.
//!
//! Exposes the analysis pipeline to browser front ends:
//! `POST /api/analyze` runs one analysis and returns the analysed issues,
//! `GET /health` is a liveness probe.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::models::{AnalysisType, AnalyzedIssue, FailurePolicy, RepositoryRef};
use crate::domain::ports::NullProgress;
use crate::infrastructure::inference::CapabilityRegistry;
use crate::services::{AnalysisService, Classifier, IssueFetcher};

/// Most issues a single request may ask for; matches the CLI's `--number`.
pub const MAX_ISSUES_PER_REQUEST: usize = 100;

/// Configuration for the analysis HTTP server.
#[derive(Debug, Clone)]
pub struct AnalyzeHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for AnalyzeHttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Request to analyse a repository.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
    pub analysis_type: AnalysisType,
    pub num_issues: usize,
    pub per_page: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Domain error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            DomainError::InvalidRepositoryReference(_) => {
                (StatusCode::BAD_REQUEST, "Invalid GitHub URL".to_string())
            }
            DomainError::InvalidRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            DomainError::UpstreamRateLimited { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, self.0.to_string())
            }
            DomainError::ClassificationFailure(_) | DomainError::CapabilityUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Analysis Error: {}", self.0),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()),
        };

        if status.is_server_error() {
            error!(%status, error = %self.0, "analysis request failed");
        } else {
            warn!(%status, error = %self.0, "analysis request rejected");
        }
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Shared state for the analysis HTTP server.
///
/// Each request builds its own service on top of these; nothing here is
/// mutated per request apart from the capability cache.
pub struct AppState {
    pub fetcher: IssueFetcher,
    pub registry: Arc<CapabilityRegistry>,
    pub failure_policy: FailurePolicy,
}

/// Analysis HTTP Server.
pub struct AnalyzeHttpServer {
    config: AnalyzeHttpConfig,
    state: Arc<AppState>,
}

impl AnalyzeHttpServer {
    pub fn new(state: AppState, config: AnalyzeHttpConfig) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Analysis HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Build the router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

// Handler functions

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Vec<AnalyzedIssue>>, ApiError> {
    let repository = RepositoryRef::from_url(req.url.trim())?;
    if !(1..=MAX_ISSUES_PER_REQUEST).contains(&req.num_issues) {
        return Err(DomainError::InvalidRequest(format!(
            "num_issues must be between 1 and {MAX_ISSUES_PER_REQUEST}, got {}",
            req.num_issues
        ))
        .into());
    }
    let capability = state.registry.get(req.analysis_type).await?;

    let service = AnalysisService::new(
        state.fetcher.clone(),
        Classifier::new(capability),
        req.analysis_type,
        state.failure_policy,
    );
    let report = service
        .analyze(&repository, req.num_issues, req.per_page, &NullProgress)
        .await?;

    Ok(Json(report.issues))
}
