use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project configuration and, by default, the database.
pub const CONFIG_DIR: &str = ".yardplan";

/// Prefix for environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "YARDPLAN_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid suggest_workers: {0}. Must be at least 1")]
    InvalidSuggestWorkers(usize),

    #[error("Invalid place_concurrency: {0}. Must be at least 1")]
    InvalidPlaceConcurrency(usize),

    #[error("Invalid cache {0}: must be positive")]
    InvalidCacheSetting(&'static str),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .yardplan/config.yaml (project config, created by init)
    /// 3. .yardplan/local.yaml (project local overrides, optional)
    /// 4. Environment variables (YARDPLAN_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same as [`ConfigLoader::load`], reading the YAML layers from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
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
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(config.database.max_connections));
        }

        if config.cache.max_capacity == 0 {
            return Err(ConfigError::InvalidCacheSetting("max_capacity"));
        }
        if config.cache.suggestion_ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheSetting("suggestion_ttl_secs"));
        }
        if config.cache.location_ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheSetting("location_ttl_secs"));
        }

        if config.bulk.suggest_workers == 0 {
            return Err(ConfigError::InvalidSuggestWorkers(config.bulk.suggest_workers));
        }
        if config.bulk.place_concurrency == 0 {
            return Err(ConfigError::InvalidPlaceConcurrency(config.bulk.place_concurrency));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{LogFormat, RotationPolicy};
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, ".yardplan/yard.db");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.suggestion_ttl_secs, 300);
        assert_eq!(config.cache.location_ttl_secs, 86_400);
        assert_eq!(config.bulk.suggest_workers, 5);
        assert_eq!(config.bulk.place_concurrency, 10);
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
database:
  path: /custom/yard.db
  max_connections: 8
cache:
  enabled: false
  suggestion_ttl_secs: 60
bulk:
  suggest_workers: 3
logging:
  level: debug
  format: json
  rotation: hourly
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.database.path, "/custom/yard.db");
        assert_eq!(config.database.max_connections, 8);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.suggestion_ttl_secs, 60);
        assert_eq!(config.cache.location_ttl_secs, 86_400);
        assert_eq!(config.bulk.suggest_workers, 3);
        assert_eq!(config.bulk.place_concurrency, 10);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.rotation, RotationPolicy::Hourly);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_unknown_log_format_is_rejected_by_parser() {
        let yaml = "logging:\n  format: xml\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "loud"),
            other => panic!("Expected InvalidLogLevel error, got {other}"),
        }
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.database.path = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyDatabasePath
        ));
    }

    #[test]
    fn test_validate_zero_max_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidMaxConnections(0)
        ));
    }

    #[test]
    fn test_validate_zero_bulk_limits() {
        let mut config = Config::default();
        config.bulk.suggest_workers = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidSuggestWorkers(0)
        ));

        let mut config = Config::default();
        config.bulk.place_concurrency = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidPlaceConcurrency(0)
        ));
    }

    #[test]
    fn test_validate_zero_ttl() {
        let mut config = Config::default();
        config.cache.suggestion_ttl_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidCacheSetting("suggestion_ttl_secs")
        ));
    }

    #[test]
    fn test_hierarchical_merging() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "bulk:\n  suggest_workers: 2\n  place_concurrency: 4\nlogging:\n  level: warn\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.yaml"), "bulk:\n  suggest_workers: 7\n").unwrap();

        let config = temp_env::with_vars_unset(["YARDPLAN_BULK__SUGGEST_WORKERS", "YARDPLAN_LOGGING__LEVEL"], || {
            ConfigLoader::load_from_dir(dir.path()).unwrap()
        });

        assert_eq!(config.bulk.suggest_workers, 7, "Local override should win");
        assert_eq!(config.bulk.place_concurrency, 4, "Base value should persist");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "cache:\n  enabled: true\n").unwrap();

        let config = temp_env::with_vars(
            [
                ("YARDPLAN_CACHE__ENABLED", Some("false")),
                ("YARDPLAN_BULK__PLACE_CONCURRENCY", Some("3")),
            ],
            || ConfigLoader::load_from_dir(dir.path()).unwrap(),
        );

        assert!(!config.cache.enabled);
        assert_eq!(config.bulk.place_concurrency, 3);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "database:\n  max_connections: 0\n").unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }
}
