//! Text normalization for classifier input.
//!
//! Turns free-form issue text into lowercase ASCII words separated by single
//! spaces. URLs and HTML tags are stripped before the character filter runs
//! so their digits and slashes never leak into the output as fragments.

use regex::Regex;
use std::sync::LazyLock;

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").expect("valid URL pattern"));
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("valid tag pattern"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid character class"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Clean `text` for classification.
///
/// Steps, in order: strip URLs, strip tags, delete everything outside
/// `[a-zA-Z\s]`, lowercase, collapse whitespace and trim. Empty input is
/// returned as is.
///
/// Lowercasing and deletions can assemble a fresh `http...` run out of
/// pieces (`"HTTPS"`, `"ht1tp"`), so the pass repeats until the text is
/// stable. The result is therefore a fixed point: `clean(clean(x)) == clean(x)`.
///
/// # Examples
///
/// ```
/// use issuepulse::services::text_normalizer::clean;
///
/// assert_eq!(clean("Check this out: http://example.com"), "check this out");
/// assert_eq!(clean("  Check <b>this</b> out: http://example.com! 123.  "), "check this out");
/// ```
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut current = single_pass(text);
    loop {
        let next = single_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn single_pass(text: &str) -> String {
    let text = URL.replace_all(text, "");
    let text = HTML_TAG.replace_all(&text, "");
    let text = DISALLOWED.replace_all(&text, "");
    let text = text.to_ascii_lowercase();
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
