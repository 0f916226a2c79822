use crate::domain::models::{ExtractedIssue, RawIssue};
use crate::services::text_normalizer::clean;

/// Project a raw issue into the reported fields plus its cleaned text.
///
/// `url`, `title` and `body` are copied untouched, absence included. Only
/// `text_clean` is derived, from `"{title} {body}"` with missing parts read
/// as empty strings. Pull requests are expected to have been filtered out
/// upstream.
pub fn extract(raw: &RawIssue) -> ExtractedIssue {
    let title = raw.title();
    let body = raw.body();
    let text_clean = clean(&format!("{} {}", title.unwrap_or(""), body.unwrap_or("")));

    ExtractedIssue {
        url: raw.html_url().map(str::to_string),
        title: title.map(str::to_string),
        body: body.map(str::to_string),
        text_clean,
    }
}
