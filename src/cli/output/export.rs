//! File exports of an analysis report: plain text and CSV.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::report::format_issue_block;
use crate::domain::models::{AnalysisReport, AnalyzedIssue};

/// Flat CSV row; every column is always present.
#[derive(Debug, Serialize)]
struct CsvRecord<'a> {
    url: Option<&'a str>,
    title: Option<&'a str>,
    body: Option<&'a str>,
    text_clean: &'a str,
    score: Option<f64>,
    label: Option<&'a str>,
    error: Option<&'a str>,
}

impl<'a> From<&'a AnalyzedIssue> for CsvRecord<'a> {
    fn from(issue: &'a AnalyzedIssue) -> Self {
        Self {
            url: issue.url.as_deref(),
            title: issue.title.as_deref(),
            body: issue.body.as_deref(),
            text_clean: &issue.text_clean,
            score: issue.score,
            label: issue.label.as_deref(),
            error: issue.error.as_deref(),
        }
    }
}

/// Write the formatted per-issue blocks to `path`.
pub fn save_to_text(report: &AnalysisReport, path: &Path) -> Result<()> {
    let mut content = format!(
        "Repository: {}\nAnalysis: {}\nFetch status: {}\n\n",
        report.repository, report.analysis_type, report.fetch_status
    );
    for issue in &report.issues {
        content.push_str(&format_issue_block(issue));
        content.push('\n');
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write one CSV row per issue to `path`.
pub fn save_to_csv(report: &AnalysisReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for issue in &report.issues {
        writer.serialize(CsvRecord::from(issue))?;
    }
    writer.flush()?;
    Ok(())
}
