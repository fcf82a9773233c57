//! Configuration management for the roster service
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

/// Default roster page
pub const DEFAULT_SOURCE_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_current_United_States_senators";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source document settings
    pub source: SourceConfig,

    /// Extraction heuristics
    pub extraction: ExtractionConfig,

    /// Snapshot cache settings
    pub cache: CacheConfig,

    /// API server settings
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where and how the roster page is fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Roster page URL
    pub url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,
}

/// Tunable extraction heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Class that marks candidate data tables
    pub table_marker: String,

    /// Fewer accepted rows than this triggers the link scan
    pub min_records: usize,

    /// Enable the link-based recovery pass
    pub link_scan: bool,

    /// Keyword a link title must contain to count as a legislator link
    pub link_keyword: String,

    /// Date used when a row's office start cannot be read
    pub default_date: NaiveDate,
}

/// Snapshot cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Snapshot time-to-live in seconds
    pub ttl_secs: u64,
}

/// API server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable CORS for API
    pub enable_cors: bool,

    /// Enable request logging
    pub enable_request_logging: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl SourceConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_SOURCE_URL),
            request_timeout_secs: 30,
            user_agent: format!("rollcall/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            table_marker: String::from("wikitable"),
            min_records: 50,
            link_scan: true,
            link_keyword: String::from("senator"),
            default_date: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables keep their default values.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    /// Overlay environment variables onto this configuration
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ROLLCALL_SOURCE_URL") {
            self.source.url = url;
        }
        if let Some(secs) = env_parse("ROLLCALL_REQUEST_TIMEOUT") {
            self.source.request_timeout_secs = secs;
        }
        if let Ok(agent) = std::env::var("ROLLCALL_USER_AGENT") {
            self.source.user_agent = agent;
        }

        if let Ok(marker) = std::env::var("ROLLCALL_TABLE_MARKER") {
            self.extraction.table_marker = marker;
        }
        if let Some(min) = env_parse("ROLLCALL_MIN_RECORDS") {
            self.extraction.min_records = min;
        }
        if let Some(enabled) = env_parse("ROLLCALL_LINK_SCAN") {
            self.extraction.link_scan = enabled;
        }
        if let Ok(keyword) = std::env::var("ROLLCALL_LINK_KEYWORD") {
            self.extraction.link_keyword = keyword;
        }
        if let Some(date) = env_parse("ROLLCALL_DEFAULT_DATE") {
            self.extraction.default_date = date;
        }

        if let Some(ttl) = env_parse("ROLLCALL_CACHE_TTL") {
            self.cache.ttl_secs = ttl;
        }

        if let Some(addr) = env_parse("ROLLCALL_BIND_ADDRESS") {
            self.server.bind_address = addr;
        }
        if let Some(enabled) = env_parse("ROLLCALL_ENABLE_CORS") {
            self.server.enable_cors = enabled;
        }
        if let Some(enabled) = env_parse("ROLLCALL_REQUEST_LOGGING") {
            self.server.enable_request_logging = enabled;
        }

        if let Ok(level) = std::env::var("ROLLCALL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ROLLCALL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.source.url)
            .with_context(|| format!("source.url is not a valid URL: {}", self.source.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("source.url must use http or https");
        }

        if self.source.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.extraction.table_marker.trim().is_empty() {
            anyhow::bail!("table_marker must not be empty");
        }

        if self.extraction.link_scan && self.extraction.link_keyword.trim().is_empty() {
            anyhow::bail!("link_keyword must not be empty when link_scan is enabled");
        }

        if self.cache.ttl_secs == 0 {
            anyhow::bail!("ttl_secs must be greater than 0");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json'");
        }

        Ok(())
    }

    /// Get snapshot time-to-live as Duration
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }
}
