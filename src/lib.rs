//! yardplan - container yard placement engine
//!
//! Suggests, places and picks up shipping containers in a yard made of
//! blocks, honouring stacking and 40ft footprint rules. Suggestions can be
//! served through a cache-aside layer, and bulk requests fan out over a
//! bounded worker pool.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Adapters** (`adapters`): SQLite position store, in-memory cache store
//! - **Service Layer** (`services`): placement engine, cache-aside decorator, bulk coordinator
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, seeding, wiring
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use yardplan::adapters::sqlite::{initialize_database, SqlitePositionStore};
//! use yardplan::domain::models::SuggestionRequest;
//! use yardplan::domain::ports::PlacementService;
//! use yardplan::services::PlacementEngine;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = initialize_database("sqlite:.yardplan/yard.db", None).await?;
//!     let engine = PlacementEngine::new(Arc::new(SqlitePositionStore::new(pool)));
//!     let position = engine
//!         .suggest(&SuggestionRequest::new("YRD1", "ALFI000001", 20, 8.6, "DRY"))
//!         .await?;
//!     println!("{position}");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, ContainerRecord, ContainerSpec, PickupRequest, PlacementRequest, Position, SuggestionRequest,
};
pub use domain::ports::PlacementService;
pub use domain::{DomainError, DomainResult, ErrorKind};
pub use services::{BulkCoordinator, CachedPlacementService, PlacementEngine};
