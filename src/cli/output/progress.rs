//! Progress bar utilities using indicatif for terminal output
//!
//! Bars draw to stderr so that stdout carries only results.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::domain::ports::ProgressReporter;

/// Style templates for different progress bar types
const PROGRESS_TEMPLATE: &str = "{msg:<18} {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]";

/// Progress bar characters for visual effect
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Create a standard progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .expect("Invalid progress bar template")
            .progress_chars(PROGRESS_CHARS),
    );
    pb
}

/// Extension trait for ProgressBar to add common utility methods
pub trait ProgressBarExt {
    /// Finish with a success message (green checkmark)
    fn finish_success(&self, message: impl Into<String>);

    /// Finish with a warning message (yellow !)
    fn finish_warning(&self, message: impl Into<String>);
}

impl ProgressBarExt for ProgressBar {
    fn finish_success(&self, message: impl Into<String>) {
        self.finish_with_message(format!("✓ {}", message.into()));
    }

    fn finish_warning(&self, message: impl Into<String>) {
        self.finish_with_message(format!("! {}", message.into()));
    }
}

/// Two-stage progress display: one bar for fetching, one for classifying.
pub struct CliProgress {
    multi: MultiProgress,
    fetch: ProgressBar,
    classify: ProgressBar,
}

impl CliProgress {
    pub fn new(target: usize) -> Self {
        Self::with_target(MultiProgress::new(), target)
    }

    /// Same display with output suppressed (JSON mode, tests).
    pub fn hidden(target: usize) -> Self {
        let multi = MultiProgress::new();
        multi.set_draw_target(ProgressDrawTarget::hidden());
        Self::with_target(multi, target)
    }

    fn with_target(multi: MultiProgress, target: usize) -> Self {
        let fetch = multi.add(create_progress_bar(target as u64));
        fetch.set_message("Fetching issues");
        let classify = multi.add(create_progress_bar(0));
        classify.set_message("Analyzing issues");
        Self {
            multi,
            fetch,
            classify,
        }
    }

    /// Finish both bars, flagging a short fetch.
    pub fn finish(&self) {
        if self.fetch.position() < self.fetch.length().unwrap_or(0) {
            self.fetch.finish_warning(format!("Fetched {} issues", self.fetch.position()));
        } else {
            self.fetch.finish_success("Fetched issues");
        }
        self.classify.finish_success("Analyzed issues");
        let _ = self.multi.clear();
    }

    pub fn fetched(&self) -> u64 {
        self.fetch.position()
    }

    pub fn classified(&self) -> u64 {
        self.classify.position()
    }
}

impl ProgressReporter for CliProgress {
    fn fetch_advanced(&self, fetched: usize, target: usize) {
        self.fetch.set_length(target as u64);
        self.fetch.set_position(fetched as u64);
    }

    fn issue_classified(&self, done: usize, total: usize) {
        self.classify.set_length(total as u64);
        self.classify.set_position(done as u64);
    }
}
