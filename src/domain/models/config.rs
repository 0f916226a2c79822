use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::analysis::{AnalysisType, FailurePolicy};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Issue-listing API configuration
    #[serde(default)]
    pub github: GithubConfig,

    /// Classification capability configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP service configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// GitHub REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    /// Base URL of the REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// User-Agent header sent with every request (required by GitHub)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_github_timeout_secs")]
    pub timeout_secs: u64,

    /// Consecutive empty pages after which the source counts as exhausted
    #[serde(default = "default_max_consecutive_empty_pages")]
    pub max_consecutive_empty_pages: usize,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("issuepulse/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_github_timeout_secs() -> u64 {
    30
}

const fn default_max_consecutive_empty_pages() -> usize {
    2
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_github_timeout_secs(),
            max_consecutive_empty_pages: default_max_consecutive_empty_pages(),
        }
    }
}

/// Classification capability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClassifierConfig {
    /// Base URL of the hosted inference endpoint; the model id is appended
    #[serde(default = "default_inference_base_url")]
    pub inference_base_url: String,

    /// Optional bearer token for the inference endpoint
    #[serde(default)]
    pub api_token: Option<String>,

    /// Model id used for binary sentiment
    #[serde(default = "default_sentiment_model")]
    pub sentiment_model: String,

    /// Model id used for multi-class emotion
    #[serde(default = "default_emotion_model")]
    pub emotion_model: String,

    /// Input limit used when the tokenizer does not declare one
    #[serde(default = "default_max_input_length")]
    pub default_max_input_length: usize,

    /// Inference request timeout in seconds
    #[serde(default = "default_inference_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether one failed classification aborts the batch
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_inference_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_sentiment_model() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}

fn default_emotion_model() -> String {
    "SamLowe/roberta-base-go_emotions".to_string()
}

const fn default_max_input_length() -> usize {
    512
}

const fn default_inference_timeout_secs() -> u64 {
    60
}

impl ClassifierConfig {
    /// Model id configured for an analysis type.
    pub fn model_for(&self, analysis_type: AnalysisType) -> &str {
        match analysis_type {
            AnalysisType::Sentiment => &self.sentiment_model,
            AnalysisType::Emotion => &self.emotion_model,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            inference_base_url: default_inference_base_url(),
            api_token: None,
            sentiment_model: default_sentiment_model(),
            emotion_model: default_emotion_model(),
            default_max_input_length: default_max_input_length(),
            timeout_secs: default_inference_timeout_secs(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file output: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
