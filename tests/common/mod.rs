//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use issuepulse::domain::ports::{ClassificationCapability, Prediction};
use issuepulse::infrastructure::github::ReqwestTransport;
use issuepulse::{DomainError, DomainResult, IssueFetcher};
use mockito::Matcher;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ISSUES_PATH: &str = "/repos/octocat/hello-world/issues";

pub fn issue(number: u64, title: &str, body: Option<&str>) -> Value {
    json!({
        "number": number,
        "title": title,
        "body": body,
        "html_url": format!("https://github.com/octocat/hello-world/issues/{number}"),
        "state": "open"
    })
}

pub fn pull_request(number: u64) -> Value {
    json!({
        "number": number,
        "title": format!("Bump dependency #{number}"),
        "body": "automated",
        "html_url": format!("https://github.com/octocat/hello-world/pull/{number}"),
        "pull_request": {"url": format!("https://api.github.com/repos/octocat/hello-world/pulls/{number}")}
    })
}

pub fn page_body(entries: Vec<Value>) -> String {
    Value::Array(entries).to_string()
}

/// Query matcher for one page request.
pub fn page_query(page: usize, per_page: usize) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), per_page.to_string()),
        Matcher::UrlEncoded("state".into(), "all".into()),
    ])
}

pub fn fetcher(base_url: &str) -> IssueFetcher {
    let transport = ReqwestTransport::new("issuepulse-tests", Duration::from_secs(5))
        .expect("client builds");
    IssueFetcher::new(Arc::new(transport), base_url)
}

pub const CLS: u32 = 0;
pub const SEP: u32 = 1;

/// Capability that tokenizes on whitespace, wraps units in CLS/SEP and labels
/// text by keyword.
///
/// Text containing "crash" or "broken" is NEGATIVE, anything else POSITIVE.
/// Text containing "explode" fails.
pub struct KeywordCapability {
    pub max_len: usize,
    vocab: Mutex<Vec<String>>,
    pub seen: Mutex<Vec<String>>,
}

impl KeywordCapability {
    pub fn new(max_len: usize) -> Arc<Self> {
        Arc::new(Self {
            max_len,
            vocab: Mutex::new(vec!["[CLS]".to_string(), "[SEP]".to_string()]),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ClassificationCapability for KeywordCapability {
    fn model_id(&self) -> &str {
        "keyword-test-model"
    }

    fn max_input_length(&self) -> usize {
        self.max_len
    }

    fn encode(&self, text: &str, max_units: usize) -> DomainResult<Vec<u32>> {
        let mut vocab = self.vocab.lock().unwrap();
        let mut units = vec![CLS];
        for word in text.split_whitespace().take(max_units.saturating_sub(2)) {
            let id = vocab.iter().position(|w| w == word).unwrap_or_else(|| {
                vocab.push(word.to_string());
                vocab.len() - 1
            });
            units.push(u32::try_from(id).unwrap());
        }
        units.push(SEP);
        Ok(units)
    }

    fn decode(&self, units: &[u32]) -> DomainResult<String> {
        let vocab = self.vocab.lock().unwrap();
        Ok(units
            .iter()
            .filter(|u| **u != CLS && **u != SEP)
            .map(|u| vocab[*u as usize].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }

    async fn infer(&self, text: &str) -> DomainResult<Prediction> {
        self.seen.lock().unwrap().push(text.to_string());
        if text.contains("explode") {
            return Err(DomainError::ClassificationFailure(
                "inference backend crashed".to_string(),
            ));
        }
        let label = if text.contains("crash") || text.contains("broken") {
            "NEGATIVE"
        } else {
            "POSITIVE"
        };
        Ok(Prediction {
            label: label.to_string(),
            score: 0.93,
        })
    }
}
