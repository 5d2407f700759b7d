//! Project initialization and service wiring.
//!
//! Handles:
//! - Configuration directory and default config file creation
//! - Database creation and migrations
//! - Building the placement services from a loaded [`Config`]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::cache::MokaCacheStore;
use crate::adapters::sqlite::{initialize_database, PoolConfig, SqlitePositionStore};
use crate::domain::models::Config;
use crate::domain::ports::{CacheStore, NullCacheStore};
use crate::infrastructure::config::CONFIG_DIR;
use crate::services::{BulkCoordinator, CachedPlacementService, PlacementEngine};

/// Default configuration template content
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# yardplan configuration
# Override settings by editing this file, adding .yardplan/local.yaml, or
# setting environment variables with the YARDPLAN_ prefix
#
# Example environment variables:
#   export YARDPLAN_DATABASE__PATH=/var/lib/yardplan/yard.db
#   export YARDPLAN_CACHE__ENABLED=false
#   export YARDPLAN_BULK__PLACE_CONCURRENCY=4
#   export YARDPLAN_LOGGING__LEVEL=debug

database:
  # Path to SQLite database file (project-local)
  path: ".yardplan/yard.db"
  max_connections: 5

cache:
  # Cache suggestions and container locations in memory
  enabled: true
  max_capacity: 10000
  suggestion_ttl_secs: 300
  location_ttl_secs: 86400

bulk:
  # Worker tasks serving bulk suggestions
  suggest_workers: 5
  # Placements in flight at once during bulk place
  place_concurrency: 10

logging:
  # Log level: trace, debug, info, warn, error
  level: "info"
  # Log format: json, pretty
  format: "pretty"
  # Rotation for files under log_dir: daily, hourly, never
  rotation: "daily"
"#;

/// Setup paths and directories
pub struct SetupPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl SetupPaths {
    /// Paths under `root`.
    pub fn in_dir(root: impl AsRef<Path>) -> Self {
        let config_dir = root.as_ref().join(CONFIG_DIR);
        Self {
            config_file: config_dir.join("config.yaml"),
            config_dir,
        }
    }

    /// Get setup paths for the current directory
    pub fn new() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::in_dir(current_dir))
    }
}

/// Create the configuration directory
pub fn create_config_dir(paths: &SetupPaths) -> Result<()> {
    fs::create_dir_all(&paths.config_dir).context("Failed to create config directory")
}

/// Write the default configuration file unless one exists.
///
/// Returns whether a file was written.
pub fn create_config_file(paths: &SetupPaths, force: bool) -> Result<bool> {
    if paths.config_file.exists() && !force {
        return Ok(false);
    }

    fs::write(&paths.config_file, DEFAULT_CONFIG_TEMPLATE).context("Failed to write config file")?;
    Ok(true)
}

/// Open the configured database and apply pending migrations.
pub async fn open_store(config: &Config) -> Result<Arc<SqlitePositionStore>> {
    let pool = initialize_database(&config.database.url(), Some(PoolConfig::from(&config.database)))
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;
    Ok(Arc::new(SqlitePositionStore::new(pool)))
}

/// Placement service as wired for the application.
pub type YardPlacement = CachedPlacementService<PlacementEngine<SqlitePositionStore>, SqlitePositionStore>;

/// Every service a command needs, sharing one store.
pub struct YardServices {
    pub store: Arc<SqlitePositionStore>,
    pub placement: Arc<YardPlacement>,
    pub bulk: BulkCoordinator<YardPlacement>,
}

impl YardServices {
    /// Wire the engine, the cache-aside layer and the bulk coordinator.
    ///
    /// With the cache disabled the decorator runs over a store that never
    /// hits, so bulk and single calls share one code path.
    pub fn wire(store: Arc<SqlitePositionStore>, config: &Config) -> Self {
        let cache: Arc<dyn CacheStore> = if config.cache.enabled {
            Arc::new(MokaCacheStore::with_capacity(config.cache.max_capacity))
        } else {
            Arc::new(NullCacheStore)
        };

        let engine = Arc::new(PlacementEngine::new(Arc::clone(&store)));
        let placement = Arc::new(CachedPlacementService::new(
            engine,
            Arc::clone(&store),
            cache,
            config.cache.clone(),
        ));
        let bulk = BulkCoordinator::new(Arc::clone(&placement), config.bulk.clone());

        Self { store, placement, bulk }
    }

    pub async fn open(config: &Config) -> Result<Self> {
        let store = open_store(config).await?;
        Ok(Self::wire(store, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_valid_config() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        crate::infrastructure::config::ConfigLoader::validate(&config).unwrap();
        assert_eq!(config.database.path, ".yardplan/yard.db");
    }

    #[test]
    fn test_create_config_file_respects_existing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SetupPaths::in_dir(dir.path());

        create_config_dir(&paths).unwrap();
        assert!(create_config_file(&paths, false).unwrap());
        fs::write(&paths.config_file, "bulk:\n  suggest_workers: 2\n").unwrap();

        assert!(!create_config_file(&paths, false).unwrap());
        assert!(fs::read_to_string(&paths.config_file).unwrap().contains("suggest_workers: 2"));

        assert!(create_config_file(&paths, true).unwrap());
    }

    #[tokio::test]
    async fn test_open_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir.path().join("db").join("yard.db").display().to_string();

        let services = YardServices::open(&config).await.unwrap();
        assert!(dir.path().join("db").join("yard.db").exists());
        services.store.pool().close().await;
    }
}
