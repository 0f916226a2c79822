//! CLI output formatting module
//!
//! Provides various output formatters for terminal display and export.

pub mod export;
pub mod progress;
pub mod report;
pub mod table;

use serde::Serialize;

pub use progress::CliProgress;
pub use report::{IssueLayout, ReportOutput};
pub use table::TableFormatter;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}
