//! Classification results and the per-issue report records built from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fetch::FetchStatus;
use super::issue::ExtractedIssue;
use super::repository::RepositoryRef;

/// Which classification capability an analysis uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Binary positive/negative sentiment.
    Sentiment,
    /// Multi-class emotion.
    Emotion,
}

impl AnalysisType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Emotion => "emotion",
        }
    }

    pub fn all() -> &'static [AnalysisType] {
        &[AnalysisType::Sentiment, AnalysisType::Emotion]
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sentiment" => Ok(Self::Sentiment),
            "emotion" => Ok(Self::Emotion),
            other => Err(format!(
                "unknown analysis type '{other}', expected 'sentiment' or 'emotion'"
            )),
        }
    }
}

/// Single best label for a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Always lowercase.
    pub label: String,
    pub score: f64,
}

/// What happens when classifying one issue fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// The first failure aborts the whole batch.
    #[default]
    Abort,
    /// Failures are recorded on the affected issue and the batch continues.
    Isolate,
}

/// Per-issue classification result under the `Isolate` policy.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationOutcome {
    Classified(ClassificationResult),
    Failed(String),
}

/// Final reported record for one issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedIssue {
    pub url: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub text_clean: String,
    pub score: Option<f64>,
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzedIssue {
    /// Merge a classification outcome into the extracted issue.
    pub fn new(issue: ExtractedIssue, outcome: ClassificationOutcome) -> Self {
        let (score, label, error) = match outcome {
            ClassificationOutcome::Classified(result) => {
                (Some(result.score), Some(result.label), None)
            }
            ClassificationOutcome::Failed(reason) => (None, None, Some(reason)),
        };

        Self {
            url: issue.url,
            title: issue.title,
            body: issue.body,
            text_clean: issue.text_clean,
            score,
            label,
            error,
        }
    }
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub repository: RepositoryRef,
    pub analysis_type: AnalysisType,
    pub fetch_status: FetchStatus,
    pub issues: Vec<AnalyzedIssue>,
}

impl AnalysisReport {
    /// Number of issues per label, most frequent first.
    pub fn label_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for label in self.issues.iter().filter_map(|i| i.label.as_ref()) {
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    pub fn failed_count(&self) -> usize {
        self.issues.iter().filter(|i| i.error.is_some()).count()
    }
}
