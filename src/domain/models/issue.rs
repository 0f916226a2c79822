//! Issue records as received from the issue-listing API and as projected
//! for classification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key whose presence marks a listing entry as a pull request.
pub const PULL_REQUEST_MARKER: &str = "pull_request";

/// An issue object exactly as returned by the listing endpoint.
///
/// The record is kept opaque; only the handful of fields the pipeline needs
/// are exposed through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawIssue(Map<String, Value>);

impl RawIssue {
    pub fn title(&self) -> Option<&str> {
        self.string_field("title")
    }

    pub fn body(&self) -> Option<&str> {
        self.string_field("body")
    }

    pub fn html_url(&self) -> Option<&str> {
        self.string_field("html_url")
    }

    /// True when the record carries a pull-request marker, whatever its value.
    pub fn is_pull_request(&self) -> bool {
        self.0.contains_key(PULL_REQUEST_MARKER)
    }

    /// Raw access to any other field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// The fields of an issue the pipeline reports, plus the derived
/// classifier input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIssue {
    pub url: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    /// Lowercase, letters-and-single-spaces projection of `"{title} {body}"`.
    pub text_clean: String,
}
