use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for yardplan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Suggestion cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Bulk fan-out limits
    #[serde(default)]
    pub bulk: BulkConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".yardplan/yard.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

/// Suggestion cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Wrap the engine with the cache-aside layer
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Maximum number of cached entries
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,

    /// Lifetime of a cached suggestion
    #[serde(default = "default_suggestion_ttl_secs")]
    pub suggestion_ttl_secs: u64,

    /// Lifetime of a cached container location
    #[serde(default = "default_location_ttl_secs")]
    pub location_ttl_secs: u64,
}

const fn default_cache_enabled() -> bool {
    true
}

const fn default_max_capacity() -> u64 {
    10_000
}

const fn default_suggestion_ttl_secs() -> u64 {
    5 * 60
}

const fn default_location_ttl_secs() -> u64 {
    24 * 60 * 60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            max_capacity: default_max_capacity(),
            suggestion_ttl_secs: default_suggestion_ttl_secs(),
            location_ttl_secs: default_location_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub const fn suggestion_ttl(&self) -> Duration {
        Duration::from_secs(self.suggestion_ttl_secs)
    }

    pub const fn location_ttl(&self) -> Duration {
        Duration::from_secs(self.location_ttl_secs)
    }
}

/// Bulk fan-out limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkConfig {
    /// Worker tasks draining the bulk suggestion queue
    #[serde(default = "default_suggest_workers")]
    pub suggest_workers: usize,

    /// Placements allowed in flight at once
    #[serde(default = "default_place_concurrency")]
    pub place_concurrency: usize,
}

const fn default_suggest_workers() -> usize {
    5
}

const fn default_place_concurrency() -> usize {
    10
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            suggest_workers: default_suggest_workers(),
            place_concurrency: default_place_concurrency(),
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
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}
