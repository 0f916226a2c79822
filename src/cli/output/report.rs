//! Human-readable rendering of analysed issues.

use serde::Serialize;
use std::fmt::Write;

use super::table::{truncate_text, TableFormatter};
use super::CommandOutput;
use crate::domain::models::{AnalysisReport, AnalyzedIssue};

const UNTITLED: &str = "(untitled)";

/// Per-issue layout for human output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum IssueLayout {
    /// Multi-line block per issue.
    #[value(name = "yes")]
    Formatted,
    /// One line per issue.
    #[value(name = "no")]
    Compact,
}

/// Multi-line block: title, score, label, URL.
pub fn format_issue_block(issue: &AnalyzedIssue) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "- Title: {}", issue.title.as_deref().unwrap_or(UNTITLED));
    match &issue.error {
        Some(reason) => {
            let _ = writeln!(out, "  Error: {reason}");
        }
        None => {
            let _ = writeln!(out, "  Score: {}", format_score(issue.score));
            let _ = writeln!(out, "  Label: {}", issue.label.as_deref().unwrap_or("-"));
        }
    }
    let _ = writeln!(out, "  URL: {}", issue.url.as_deref().unwrap_or("-"));
    out
}

/// Single line: title, score, label.
pub fn format_issue_line(issue: &AnalyzedIssue) -> String {
    let title = truncate_text(issue.title.as_deref().unwrap_or(UNTITLED), 80);
    match &issue.error {
        Some(reason) => format!("Title: {title} Error: {reason}"),
        None => format!(
            "Title: {title} Score: {} Label: {}",
            format_score(issue.score),
            issue.label.as_deref().unwrap_or("-")
        ),
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{s:.4}"))
}

/// Report wrapper implementing [`CommandOutput`].
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    #[serde(skip)]
    layout: IssueLayout,
    #[serde(flatten)]
    report: AnalysisReport,
}

impl ReportOutput {
    pub fn new(report: AnalysisReport, layout: IssueLayout) -> Self {
        Self { layout, report }
    }

    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }

    /// All issues in the selected layout, without the summary table.
    pub fn render_issues(&self) -> String {
        self.report
            .issues
            .iter()
            .map(|issue| match self.layout {
                IssueLayout::Formatted => format_issue_block(issue),
                IssueLayout::Compact => format_issue_line(issue) + "\n",
            })
            .collect()
    }
}

impl CommandOutput for ReportOutput {
    fn to_human(&self) -> String {
        let report = &self.report;
        let mut out = format!(
            "Analyzed {} issues for {} ({})\n\n",
            report.issues.len(),
            report.repository,
            report.analysis_type
        );
        out.push_str(&self.render_issues());
        out.push('\n');
        out.push_str(&TableFormatter::new().format_label_counts(report));
        out
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.report).unwrap_or_default()
    }
}
