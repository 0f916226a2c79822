pub mod analysis;
pub mod config;
pub mod fetch;
pub mod issue;
pub mod repository;

pub use analysis::{
    AnalysisReport, AnalysisType, AnalyzedIssue, ClassificationOutcome, ClassificationResult,
    FailurePolicy,
};
pub use config::{ClassifierConfig, Config, GithubConfig, LoggingConfig, ServerConfig};
pub use fetch::{FetchOutcome, FetchStatus};
pub use issue::{ExtractedIssue, RawIssue};
pub use repository::RepositoryRef;
