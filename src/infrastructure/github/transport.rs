//! `reqwest`-backed [`HttpTransport`] for the GitHub REST API.
//!
//! Every request carries the GitHub media type, API version and a
//! User-Agent (GitHub rejects requests without one). Non-2xx statuses are
//! returned as responses, not errors: status interpretation belongs to the
//! fetcher.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::trace;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::GithubConfig;
use crate::domain::ports::{HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> DomainResult<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    pub fn from_config(config: &GithubConfig) -> DomainResult<Self> {
        Self::new(&config.user_agent, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> DomainResult<HttpResponse> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("GET {url}: {e}")))?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("reading body of {url}: {e}")))?;
        trace!(status, bytes = body.len(), "response received");

        Ok(headers
            .into_iter()
            .fold(HttpResponse::new(status, body), |resp, (name, value)| {
                resp.with_header(&name, value)
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_get_returns_status_headers_and_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/o/r/issues")
            .match_header("accept", "application/vnd.github+json")
            .match_header("user-agent", "issuepulse-test")
            .with_status(403)
            .with_header("X-RateLimit-Reset", "1700000000")
            .with_body("rate limited")
            .create_async()
            .await;

        let transport = ReqwestTransport::new("issuepulse-test", Duration::from_secs(5)).unwrap();
        let response = transport
            .get(&format!("{}/repos/o/r/issues", server.url()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 403);
        assert_eq!(response.header("x-ratelimit-reset"), Some("1700000000"));
        assert_eq!(response.body, "rate limited");
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let transport = ReqwestTransport::new("issuepulse-test", Duration::from_secs(1)).unwrap();

        // Port 9 (discard) on localhost is not expected to accept connections.
        let err = transport.get("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
    }
}
