//! Paginated, rate-limit-aware issue retrieval.
//!
//! The fetch loop requests one page at a time from the issue-listing
//! endpoint and stops in one of three terminal states:
//! - `Success`: the target count was reached, or the source ran dry
//! - `RateLimited`: the API answered 403; nothing is retried or awaited
//! - `Error`: any other status, a transport failure, or an undecodable page
//!
//! Whatever was accumulated before a terminal state is always returned, in
//! page order.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::models::{FetchOutcome, GithubConfig, RawIssue, RepositoryRef};
use crate::domain::ports::{HttpTransport, ProgressReporter};

/// Largest `per_page` the listing endpoint honours.
pub const MAX_PAGE_SIZE: usize = 100;

const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Issue fetcher over an injected transport.
#[derive(Clone)]
pub struct IssueFetcher {
    transport: Arc<dyn HttpTransport>,
    api_base_url: String,
    max_consecutive_empty_pages: usize,
}

impl IssueFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, api_base_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            max_consecutive_empty_pages: 2,
        }
    }

    pub fn from_config(transport: Arc<dyn HttpTransport>, config: &GithubConfig) -> Self {
        Self::new(transport, config.api_base_url.clone())
            .with_max_consecutive_empty_pages(config.max_consecutive_empty_pages)
    }

    /// Number of back-to-back empty pages that ends the loop with `Success`.
    #[must_use]
    pub fn with_max_consecutive_empty_pages(mut self, pages: usize) -> Self {
        self.max_consecutive_empty_pages = pages.max(1);
        self
    }

    /// Fetch up to `target_count` genuine issues (pull requests excluded).
    ///
    /// Pages are requested with `per_page = min(target_count, 100)`.
    /// `page_size` is the caller's hint and is only logged; it never changes
    /// the requests. A page whose entries are all pull requests does not end
    /// the loop.
    #[instrument(skip(self, progress), fields(repository = %repository))]
    pub async fn fetch(
        &self,
        repository: &RepositoryRef,
        target_count: usize,
        page_size: usize,
        progress: &dyn ProgressReporter,
    ) -> FetchOutcome {
        let per_page = target_count.min(MAX_PAGE_SIZE);
        debug!(page_size, per_page, "page size hint is advisory");
        let mut issues: Vec<RawIssue> = Vec::with_capacity(per_page);
        let mut page = 1usize;
        let mut empty_pages = 0usize;

        while issues.len() < target_count {
            let url = self.page_url(repository, page, per_page);
            debug!(page, per_page, "requesting issue page");

            let response = match self.transport.get(&url).await {
                Ok(response) => response,
                Err(err) => {
                    error!(page, error = %err, "issue page request failed");
                    return FetchOutcome::error(issues, err.to_string());
                }
            };

            match response.status {
                200 => {
                    let batch: Vec<RawIssue> = match serde_json::from_str(&response.body) {
                        Ok(batch) => batch,
                        Err(err) => {
                            error!(page, error = %err, "issue page is not a list of issues");
                            return FetchOutcome::error(
                                issues,
                                format!("page {page} returned a malformed issue list: {err}"),
                            );
                        }
                    };

                    if batch.is_empty() {
                        empty_pages += 1;
                        if empty_pages >= self.max_consecutive_empty_pages {
                            info!(
                                page,
                                fetched = issues.len(),
                                target = target_count,
                                "no more issues upstream"
                            );
                            break;
                        }
                    } else {
                        empty_pages = 0;
                    }

                    let remaining = target_count - issues.len();
                    let before = issues.len();
                    issues.extend(
                        batch
                            .into_iter()
                            .filter(|issue| !issue.is_pull_request())
                            .take(remaining),
                    );
                    debug!(
                        page,
                        added = issues.len() - before,
                        fetched = issues.len(),
                        "issue page processed"
                    );
                    progress.fetch_advanced(issues.len(), target_count);
                }
                403 => {
                    let reset_at = parse_reset(response.header(RATE_LIMIT_RESET_HEADER));
                    warn!(
                        fetched = issues.len(),
                        "GitHub rate limit reached. Unable to fetch more issues. You can try again after: {}",
                        reset_at.map_or_else(
                            || "an unknown time".to_string(),
                            |at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
                        )
                    );
                    return FetchOutcome::rate_limited(issues, reset_at);
                }
                status => {
                    error!(page, status, "Request failed with status code {status}");
                    return FetchOutcome::error(issues, format!("HTTP {status} on page {page}"));
                }
            }

            page += 1;
        }

        info!(fetched = issues.len(), "Total number of issues fetched");
        FetchOutcome::success(issues)
    }

    fn page_url(&self, repository: &RepositoryRef, page: usize, per_page: usize) -> String {
        format!(
            "{}/repos/{}/{}/issues?page={page}&per_page={per_page}&state=all",
            self.api_base_url, repository.owner, repository.repo
        )
    }
}

/// Reset hint in epoch seconds; absent, unparseable and zero all mean unknown.
fn parse_reset(header: Option<&str>) -> Option<DateTime<Utc>> {
    let seconds = header
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(0);
    if seconds <= 0 {
        return None;
    }
    DateTime::from_timestamp(seconds, 0)
}
