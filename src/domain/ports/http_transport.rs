use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::errors::DomainResult;

/// A response as seen by the fetch loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are stored lowercase.
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Minimal HTTP GET capability.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status code; `Err` is reserved for requests that produced no response at
/// all (connection refused, timeout, unreadable body).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> DomainResult<HttpResponse>;
}
