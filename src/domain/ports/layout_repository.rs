//! Layout repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Block, ContainerRecord, NewBlock, NewPlan, NewYard, PlacementPlan, Yard};

/// Maintenance access to yard reference data.
///
/// The placement core only reads reference data; this port is used by
/// seeding and operator tooling.
#[async_trait]
pub trait LayoutRepository: Send + Sync {
    async fn create_yard(&self, yard: &NewYard) -> DomainResult<Yard>;

    async fn list_yards(&self) -> DomainResult<Vec<Yard>>;

    async fn create_block(&self, block: &NewBlock) -> DomainResult<Block>;

    async fn create_plan(&self, plan: &NewPlan) -> DomainResult<PlacementPlan>;

    /// Plans of a block ordered by slot then row start.
    async fn list_plans(&self, block_id: i64) -> DomainResult<Vec<PlacementPlan>>;

    /// Active containers of a yard, optionally restricted to one block.
    async fn list_containers(&self, yard_id: i64, block_id: Option<i64>) -> DomainResult<Vec<ContainerRecord>>;
}
