//! Hierarchical configuration loading via figment.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The upstream base URL is missing.
    #[error("Upstream base_url cannot be empty")]
    EmptyBaseUrl,

    /// The per-call timeout is zero.
    #[error("Invalid timeout_secs: must be at least 1")]
    InvalidTimeout,

    /// The retry budget is zero.
    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    /// The backoff base delay is zero.
    #[error("Invalid base_delay_ms: must be at least 1")]
    InvalidBaseDelay,

    /// The jitter fraction is outside [0, 1].
    #[error("Invalid jitter: {0}. Must be within 0.0..=1.0")]
    InvalidJitter(f64),

    /// The cache sweep period is zero.
    #[error("Invalid sweep_period_secs: must be at least 1")]
    InvalidSweepPeriod,

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown log format.
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. rosterline.yaml in the working directory
    /// 3. Environment variables (`ROSTERLINE_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("rosterline.yaml"))
            .merge(Env::prefixed("ROSTERLINE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
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

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.upstream.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.upstream.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }
        if config.retry.base_delay_ms == 0 {
            return Err(ConfigError::InvalidBaseDelay);
        }
        if !(0.0..=1.0).contains(&config.retry.jitter) {
            return Err(ConfigError::InvalidJitter(config.retry.jitter));
        }

        if config.cache.sweep_period_secs == 0 {
            return Err(ConfigError::InvalidSweepPeriod);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
