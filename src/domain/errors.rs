//! Domain errors for the issue analysis pipeline.

use thiserror::Error;

/// Domain-level errors that can occur while analysing a repository.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid repository reference: {0}")]
    InvalidRepositoryReference(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("GitHub rate limit reached before any issue was fetched{}", format_reset(.reset_at.as_ref()))]
    UpstreamRateLimited {
        reset_at: Option<chrono::DateTime<chrono::Utc>>,
    },

    #[error("Upstream request failed: {0}")]
    UpstreamError(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Classification failed: {0}")]
    ClassificationFailure(String),

    #[error("Classification capability unavailable: {0}")]
    CapabilityUnavailable(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

fn format_reset(reset_at: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    reset_at
        .map(|at| format!(" (try again after {})", at.format("%Y-%m-%d %H:%M:%S UTC")))
        .unwrap_or_default()
}
