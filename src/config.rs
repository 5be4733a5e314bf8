//! Server configuration.
//!
//! Configuration is a JSON document shaped like
//! `{cache: {enabled, ttl, location}, scraping: {timeout, retries, rateLimit}, logging: {level}}`
//! with every field optional. Durations are milliseconds.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default cache time-to-live: 24 hours.
pub const DEFAULT_CACHE_TTL_MS: u64 = 86_400_000;
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
/// Default attempts per fetch.
pub const DEFAULT_RETRIES: u32 = 3;

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Disk cache settings.
    pub cache: CacheConfig,
    /// Outbound fetch settings.
    pub scraping: ScrapingConfig,
    /// Diagnostic output settings.
    pub logging: LoggingConfig,
}

/// Disk cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, the cache never touches disk and always misses.
    pub enabled: bool,
    /// Entry time-to-live in milliseconds.
    pub ttl: u64,
    /// Cache directory.
    pub location: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_CACHE_TTL_MS,
            location: PathBuf::from(".cache"),
        }
    }
}

/// Outbound fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrapingConfig {
    /// Per-request timeout in milliseconds.
    pub timeout: u64,
    /// Attempts per fetch, including the first.
    pub retries: u32,
    /// Requests per second. Accepted for compatibility; no throttling is applied.
    pub rate_limit: u32,
    /// Documentation site root.
    pub base_url: String,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_MS,
            retries: DEFAULT_RETRIES,
            rate_limit: 5,
            base_url: crate::consts::PRIMENG_BASE_URL.to_string(),
        }
    }
}

impl ScrapingConfig {
    /// Timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

/// Diagnostic output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level emitted.
    pub level: LogLevel,
}

/// Log levels, ordered `debug < info < warn < error`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Cache hits/misses and persistence detail.
    Debug,
    /// Lifecycle and scrape summaries.
    #[default]
    Info,
    /// Retries and recoverable failures.
    Warn,
    /// Failures surfaced to callers.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(Error::Config(format!("unknown log level '{}'", other))),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no component can work with.
    pub fn validate(&self) -> Result<()> {
        if self.scraping.timeout == 0 {
            return Err(Error::Config("scraping.timeout must be greater than zero".into()));
        }
        if !self.scraping.base_url.starts_with("http://") && !self.scraping.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "scraping.baseUrl must be an http(s) URL, got '{}'",
                self.scraping.base_url
            )));
        }
        Ok(())
    }
}
