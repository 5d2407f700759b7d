//! SQLite database adapters for the yard placement system.

pub mod connection;
pub mod migrations;
pub mod position_store;

pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use position_store::SqlitePositionStore;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ContainerHeight, ContainerSize, ContainerSpec, ContainerType};

/// Parse an RFC3339 datetime string from a SQLite row field.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map_err(|e| DomainError::SerializationError(e.to_string()))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Narrow a SQLite INTEGER coordinate to `u32`.
pub fn parse_coordinate(value: i64, column: &str) -> DomainResult<u32> {
    u32::try_from(value)
        .map_err(|_| DomainError::SerializationError(format!("{column} out of range: {value}")))
}

/// Rebuild a container spec from its stored columns.
pub fn parse_spec(size: i64, height: f64, container_type: &str) -> DomainResult<ContainerSpec> {
    let size = u32::try_from(size)
        .ok()
        .and_then(ContainerSize::from_feet)
        .ok_or_else(|| DomainError::SerializationError(format!("Invalid container size: {size}")))?;
    let height = ContainerHeight::from_feet(height)
        .ok_or_else(|| DomainError::SerializationError(format!("Invalid container height: {height}")))?;
    let container_type = ContainerType::from_str(container_type).ok_or_else(|| {
        DomainError::SerializationError(format!("Invalid container type: {container_type}"))
    })?;
    Ok(ContainerSpec::new(size, height, container_type))
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

/// Open (or create) the database at `database_url` and bring its schema up to date.
pub async fn initialize_database(database_url: &str, config: Option<PoolConfig>) -> Result<SqlitePool, DatabaseError> {
    let pool = create_pool(database_url, config).await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(&all_embedded_migrations()).await?;
    Ok(pool)
}

/// Create an in-memory test pool with all migrations applied.
pub async fn create_migrated_test_pool() -> Result<SqlitePool, DatabaseError> {
    let pool = create_test_pool().await?;
    let migrator = Migrator::new(pool.clone());
    migrator.run_embedded_migrations(&all_embedded_migrations()).await?;
    Ok(pool)
}
