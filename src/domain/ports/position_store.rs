//! Position store port.

use async_trait::async_trait;
use std::ops::RangeInclusive;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    Block, Cell, ContainerRecord, ContainerSize, ContainerSpec, NewContainer, PlacementPlan, Yard,
};

/// Query and mutation access to yard, block, plan and container records.
///
/// Occupancy queries are footprint-aware: a size-40 record at slot `s`
/// also occupies slot `s + 1`.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Look up a yard by its code.
    async fn resolve_yard(&self, code: &str) -> DomainResult<Option<Yard>>;

    /// List a yard's blocks in store order (by block code).
    async fn list_blocks(&self, yard_id: i64) -> DomainResult<Vec<Block>>;

    /// Look up a block by yard and block code.
    async fn resolve_block(&self, yard_id: i64, code: &str) -> DomainResult<Option<Block>>;

    /// First plan of the block bound to exactly this spec.
    async fn find_plan(&self, block_id: i64, spec: &ContainerSpec) -> DomainResult<Option<PlacementPlan>>;

    /// Whether any cell a container of `size` at `cell` would cover is taken.
    async fn is_occupied(&self, block_id: i64, cell: Cell, size: ContainerSize) -> DomainResult<bool>;

    /// Records whose footprint falls inside the given slot x row rectangle.
    async fn occupied_in_rect(
        &self,
        block_id: i64,
        slots: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
    ) -> DomainResult<Vec<ContainerRecord>>;

    /// Whether anything covers `(slot, row)` at a tier above `cell.tier`.
    async fn is_blocked_above(&self, block_id: i64, cell: Cell) -> DomainResult<bool>;

    /// Persist a new placement. Fails with `DuplicateContainer` when the
    /// number is already active.
    async fn insert_container(&self, container: &NewContainer) -> DomainResult<ContainerRecord>;

    /// Remove an active placement. Fails with `ContainerNotFound`.
    async fn delete_container(&self, number: &str) -> DomainResult<()>;

    /// Look up an active placement by container number.
    async fn find_container(&self, number: &str) -> DomainResult<Option<ContainerRecord>>;
}
