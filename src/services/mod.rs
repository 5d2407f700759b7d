//! Application services for yard placement.
//!
//! - `PlacementEngine`: suggest / place / pickup over a position store
//! - `CachedPlacementService`: cache-aside decorator around any placement service
//! - `BulkCoordinator`: bounded fan-out of independent suggestions and placements

pub mod bulk_coordinator;
pub mod cached_placement;
pub mod placement_engine;
pub mod placement_search;
pub mod worker_pool;

pub use bulk_coordinator::{
    BulkCoordinator, BulkSummary, Outcome, PlacementOutcome, SuggestionOutcome, SuggestionResult,
};
pub use cached_placement::{location_key, suggestion_key, suggestion_prefix, CachedPlacementService};
pub use placement_engine::PlacementEngine;
pub use placement_search::{find_free_cell, Occupancy};
pub use worker_pool::WorkerPool;
