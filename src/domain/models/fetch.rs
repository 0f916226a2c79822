use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::issue::RawIssue;

/// Terminal state of a paginated fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Success,
    RateLimited,
    Error,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::RateLimited => "rate_limited",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// Result of a paginated fetch: the terminal status and every genuine issue
/// accumulated up to that point, in page order.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub status: FetchStatus,
    pub issues: Vec<RawIssue>,
    /// Reset time reported by the API when the fetch was rate limited.
    pub rate_limit_reset: Option<DateTime<Utc>>,
    /// Why the fetch ended in `Error`.
    pub failure: Option<String>,
}

impl FetchOutcome {
    pub fn success(issues: Vec<RawIssue>) -> Self {
        Self {
            status: FetchStatus::Success,
            issues,
            rate_limit_reset: None,
            failure: None,
        }
    }

    pub fn rate_limited(issues: Vec<RawIssue>, reset_at: Option<DateTime<Utc>>) -> Self {
        Self {
            status: FetchStatus::RateLimited,
            issues,
            rate_limit_reset: reset_at,
            failure: None,
        }
    }

    pub fn error(issues: Vec<RawIssue>, failure: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Error,
            issues,
            rate_limit_reset: None,
            failure: Some(failure.into()),
        }
    }
}
