//! Table output formatting for CLI commands
//!
//! Summary tables over analysis reports using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::AnalysisReport;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Label distribution of a report: count and share per label.
    pub fn format_label_counts(&self, report: &AnalysisReport) -> String {
        let mut table = self.create_base_table();

        table.set_header(vec![
            Cell::new("Label").add_attribute(Attribute::Bold),
            Cell::new("Issues").add_attribute(Attribute::Bold),
            Cell::new("Share").add_attribute(Attribute::Bold),
        ]);

        let total = report.issues.len().max(1);
        for (label, count) in report.label_counts() {
            let label_cell = if self.use_colors {
                Cell::new(&label).fg(label_color(&label))
            } else {
                Cell::new(&label)
            };
            #[allow(clippy::cast_precision_loss)]
            let share = count as f64 * 100.0 / total as f64;

            table.add_row(vec![
                label_cell,
                Cell::new(count.to_string()),
                Cell::new(format!("{share:.1}%")),
            ]);
        }

        let failed = report.failed_count();
        if failed > 0 {
            let cell = if self.use_colors {
                Cell::new("(failed)").fg(Color::Red)
            } else {
                Cell::new("(failed)")
            };
            table.add_row(vec![cell, Cell::new(failed.to_string()), Cell::new("-")]);
        }

        table.to_string()
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        // Use UTF-8 preset for nice borders
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

/// Sentiment labels get fixed colours; emotion labels share a neutral one.
fn label_color(label: &str) -> Color {
    match label {
        "positive" | "joy" | "gratitude" | "admiration" | "approval" | "love" => Color::Green,
        "negative" | "anger" | "annoyance" | "disappointment" | "disapproval" => Color::Red,
        "neutral" => Color::DarkGrey,
        _ => Color::Cyan,
    }
}

/// Truncate text to max chars with ellipsis
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        AnalysisType, AnalyzedIssue, ClassificationOutcome, ClassificationResult,
        ExtractedIssue, FetchStatus, RepositoryRef,
    };

    fn report(labels: &[Option<&str>]) -> AnalysisReport {
        let issues = labels
            .iter()
            .map(|label| {
                let outcome = match label {
                    Some(l) => ClassificationOutcome::Classified(ClassificationResult {
                        label: (*l).to_string(),
                        score: 0.5,
                    }),
                    None => ClassificationOutcome::Failed("boom".to_string()),
                };
                AnalyzedIssue::new(
                    ExtractedIssue {
                        url: None,
                        title: None,
                        body: None,
                        text_clean: String::new(),
                    },
                    outcome,
                )
            })
            .collect();
        AnalysisReport {
            repository: RepositoryRef::new("o", "r").unwrap(),
            analysis_type: AnalysisType::Sentiment,
            fetch_status: FetchStatus::Success,
            issues,
        }
    }

    #[test]
    fn test_label_table_contents() {
        let formatter = TableFormatter::with_config(false, Some(80));
        let output = formatter.format_label_counts(&report(&[
            Some("negative"),
            Some("positive"),
            Some("negative"),
            None,
        ]));

        assert!(output.contains("Label"));
        assert!(output.contains("negative"));
        assert!(output.contains("50.0%"));
        assert!(output.contains("(failed)"));
    }

    #[test]
    fn test_label_table_without_failures() {
        let formatter = TableFormatter::with_config(false, None);
        let output = formatter.format_label_counts(&report(&[Some("joy")]));
        assert!(output.contains("100.0%"));
        assert!(!output.contains("(failed)"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("this is a long title", 10), "this is...");
        assert_eq!(truncate_text("ééééééé", 5), "éé...");
    }
}
