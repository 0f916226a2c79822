//! issuepulse - GitHub issue sentiment and emotion analysis
//!
//! Fetches recent issues of a repository page by page, cleans their text,
//! and classifies each one with a hosted text-classification model.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and the ports the pipeline depends on
//! - **Service Layer** (`services`): Text normalization, extraction, fetching, classification
//! - **Infrastructure Layer** (`infrastructure`): GitHub transport, model capabilities, config, logging
//! - **Adapters** (`adapters`): HTTP API over the pipeline
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use issuepulse::domain::models::{AnalysisType, FailurePolicy, RepositoryRef};
//! use issuepulse::domain::ports::NullProgress;
//! use issuepulse::infrastructure::github::ReqwestTransport;
//! use issuepulse::infrastructure::inference::CapabilityRegistry;
//! use issuepulse::services::{AnalysisService, Classifier, IssueFetcher};
//! use issuepulse::Config;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::default();
//! let transport = Arc::new(ReqwestTransport::from_config(&config.github)?);
//! let registry = CapabilityRegistry::hosted(config.classifier.clone());
//!
//! let service = AnalysisService::new(
//!     IssueFetcher::from_config(transport, &config.github),
//!     Classifier::new(registry.get(AnalysisType::Sentiment).await?),
//!     AnalysisType::Sentiment,
//!     FailurePolicy::Abort,
//! );
//! let repository = RepositoryRef::from_url("https://github.com/neovim/neovim")?;
//! let report = service.analyze(&repository, 5, 100, &NullProgress).await?;
//! println!("{:?}", report.label_counts());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AnalysisReport, AnalysisType, AnalyzedIssue, ClassificationResult, Config, ExtractedIssue,
    FailurePolicy, FetchOutcome, FetchStatus, RawIssue, RepositoryRef,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AnalysisService, Classifier, IssueFetcher};
