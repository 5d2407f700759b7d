//! Port trait definitions (Hexagonal Architecture)
//!
//! - PositionStore: yard, block, plan and container queries used by the engine
//! - LayoutRepository: reference data maintenance
//! - CacheStore: TTL key/value cache used by the cache-aside layer
//! - PlacementService: the suggest / place / pickup capability

pub mod cache_store;
pub mod layout_repository;
pub mod null_cache;
pub mod placement_service;
pub mod position_store;

pub use cache_store::{CacheError, CacheResult, CacheStore};
pub use layout_repository::LayoutRepository;
pub use null_cache::NullCacheStore;
pub use placement_service::PlacementService;
pub use position_store::PositionStore;
