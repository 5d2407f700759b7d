//! Common test utilities for integration tests
//!
//! Provides a migrated in-memory store seeded with a small reference yard,
//! plus helpers shared across the placement, cache and bulk suites.

use std::sync::Arc;

use yardplan::adapters::sqlite::{create_migrated_test_pool, SqlitePositionStore};
use yardplan::domain::models::{ContainerSpec, NewBlock, NewPlan, NewYard, PlacementRequest, SuggestionRequest};
use yardplan::domain::ports::LayoutRepository;

/// Yard code used by every seeded scenario.
pub const YARD: &str = "YRD1";

/// Block code used by every seeded scenario.
pub const BLOCK: &str = "A1";

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Fresh in-memory store with no reference data.
pub async fn empty_store() -> Arc<SqlitePositionStore> {
    let pool = create_migrated_test_pool()
        .await
        .expect("Failed to create migrated test pool");
    Arc::new(SqlitePositionStore::new(pool))
}

/// Store seeded with `YRD1` / `A1` (10 slots, 2 rows, 3 tiers) and a single
/// 20ft 8.6 DRY plan covering the whole block.
pub async fn seeded_store() -> Arc<SqlitePositionStore> {
    let store = empty_store().await;
    seed_block(&store, BLOCK, (10, 2, 3), (1, 10), (1, 2), ContainerSpec::reference()).await;
    store
}

/// Add a block and one plan to `YRD1`, creating the yard on first use.
#[allow(dead_code)]
pub async fn seed_block(
    store: &SqlitePositionStore,
    code: &str,
    dims: (u32, u32, u32),
    slots: (u32, u32),
    rows: (u32, u32),
    spec: ContainerSpec,
) {
    let yard = match store.list_yards().await.expect("list yards").into_iter().find(|y| y.code == YARD) {
        Some(yard) => yard,
        None => store
            .create_yard(&NewYard {
                code: YARD.into(),
                name: "Test Yard".into(),
                description: String::new(),
            })
            .await
            .expect("create yard"),
    };

    let block = store
        .create_block(&NewBlock {
            yard_id: yard.id,
            code: code.into(),
            name: String::new(),
            max_slot: dims.0,
            max_row: dims.1,
            max_tier: dims.2,
        })
        .await
        .expect("create block");

    store
        .create_plan(&NewPlan {
            block_id: block.id,
            slot_start: slots.0,
            slot_end: slots.1,
            row_start: rows.0,
            row_end: rows.1,
            spec,
            stacking_priority: String::new(),
        })
        .await
        .expect("create plan");
}

/// 20ft 8.6 DRY suggestion for `container_number` in `YRD1`.
#[allow(dead_code)]
pub fn dry_twenty(container_number: &str) -> SuggestionRequest {
    SuggestionRequest::new(YARD, container_number, 20, 8.6, "DRY")
}

/// Placement into `A1` of `YRD1`.
#[allow(dead_code)]
pub fn place_at(container_number: &str, slot: u32, row: u32, tier: u32) -> PlacementRequest {
    PlacementRequest::new(YARD, container_number, BLOCK, slot, row, tier)
}
