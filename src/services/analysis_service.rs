//! Fetch → extract → classify pipeline for one repository.

use tracing::{info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    AnalysisReport, AnalysisType, AnalyzedIssue, ClassificationOutcome, FailurePolicy,
    FetchStatus, RepositoryRef,
};
use crate::domain::ports::ProgressReporter;
use crate::services::{issue_extractor, Classifier, IssueFetcher};

/// Runs one analysis end to end.
///
/// Issues are fetched page by page, then extracted and classified one at a
/// time in arrival order. A rate-limited fetch that still produced issues is
/// analysed as a partial result; a fetch that ended in error stops the run.
pub struct AnalysisService {
    fetcher: IssueFetcher,
    classifier: Classifier,
    analysis_type: AnalysisType,
    failure_policy: FailurePolicy,
}

impl AnalysisService {
    pub fn new(
        fetcher: IssueFetcher,
        classifier: Classifier,
        analysis_type: AnalysisType,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            analysis_type,
            failure_policy,
        }
    }

    /// Analyse up to `num_issues` issues of `repository`.
    ///
    /// # Errors
    /// - `UpstreamError` if the fetch ended in error
    /// - `UpstreamRateLimited` if the fetch was rate limited before any issue arrived
    /// - `ClassificationFailure` on the first failed issue under `FailurePolicy::Abort`
    #[instrument(skip(self, progress), fields(
        repository = %repository,
        analysis_type = %self.analysis_type,
        model = %self.classifier.model_id(),
    ))]
    pub async fn analyze(
        &self,
        repository: &RepositoryRef,
        num_issues: usize,
        page_size: usize,
        progress: &dyn ProgressReporter,
    ) -> DomainResult<AnalysisReport> {
        let outcome = self
            .fetcher
            .fetch(repository, num_issues, page_size, progress)
            .await;

        match outcome.status {
            FetchStatus::Success => {}
            FetchStatus::Error => {
                return Err(DomainError::UpstreamError(
                    outcome
                        .failure
                        .unwrap_or_else(|| "issue fetch failed".to_string()),
                ));
            }
            FetchStatus::RateLimited if outcome.issues.is_empty() => {
                return Err(DomainError::UpstreamRateLimited {
                    reset_at: outcome.rate_limit_reset,
                });
            }
            FetchStatus::RateLimited => {
                warn!(
                    fetched = outcome.issues.len(),
                    requested = num_issues,
                    "rate limited, analysing partial result"
                );
            }
        }

        let total = outcome.issues.len();
        let mut analyzed = Vec::with_capacity(total);

        for (index, raw) in outcome.issues.iter().enumerate() {
            let issue = issue_extractor::extract(raw);

            let classification = match self.classifier.classify(&issue.text_clean).await {
                Ok(result) => ClassificationOutcome::Classified(result),
                Err(err) => {
                    let reason = match err {
                        DomainError::ClassificationFailure(reason) => reason,
                        other => other.to_string(),
                    };
                    let where_ = issue.url.as_deref().unwrap_or("<no url>");
                    match self.failure_policy {
                        FailurePolicy::Abort => {
                            return Err(DomainError::ClassificationFailure(format!(
                                "{where_}: {reason}"
                            )));
                        }
                        FailurePolicy::Isolate => {
                            warn!(issue = where_, error = %reason, "classification failed, continuing");
                            ClassificationOutcome::Failed(reason)
                        }
                    }
                }
            };

            analyzed.push(AnalyzedIssue::new(issue, classification));
            progress.issue_classified(index + 1, total);
        }

        let report = AnalysisReport {
            repository: repository.clone(),
            analysis_type: self.analysis_type,
            fetch_status: outcome.status,
            issues: analyzed,
        };
        info!(
            analyzed = report.issues.len(),
            failed = report.failed_count(),
            "analysis complete"
        );
        Ok(report)
    }
}
