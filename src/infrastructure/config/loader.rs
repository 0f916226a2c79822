use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".issuepulse";

/// Environment variable prefix; `__` separates nested keys.
pub const ENV_PREFIX: &str = "ISSUEPULSE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_consecutive_empty_pages: {0}. Must be at least 1")]
    InvalidEmptyPageLimit(usize),

    #[error("Invalid {0} timeout: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the current directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .issuepulse/config.yaml
    /// 3. .issuepulse/local.yaml
    /// 4. Environment variables (ISSUEPULSE_* prefix)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Same layering as [`ConfigLoader::load`], rooted at `root`.
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let github = &config.github;
        if github.max_consecutive_empty_pages == 0 {
            return Err(ConfigError::InvalidEmptyPageLimit(
                github.max_consecutive_empty_pages,
            ));
        }
        if github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("github"));
        }
        if github.api_base_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "github.api_base_url cannot be empty".to_string(),
            ));
        }

        let classifier = &config.classifier;
        if classifier.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("classifier"));
        }
        if classifier.default_max_input_length == 0 {
            return Err(ConfigError::ValidationFailed(
                "classifier.default_max_input_length must be at least 1".to_string(),
            ));
        }
        for (key, model) in [
            ("sentiment_model", &classifier.sentiment_model),
            ("emotion_model", &classifier.emotion_model),
        ] {
            if model.trim().is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "classifier.{key} cannot be empty"
                )));
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}
