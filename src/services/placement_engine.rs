//! Placement engine: suggest, place and pickup against a position store.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::placement_search::{find_free_cell, Occupancy};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::request::require_container_number;
use crate::domain::models::{
    Block, Cell, ContainerRecord, ContainerSize, ContainerSpec, NewContainer, PickupRequest, PlacementRequest, Position,
    SuggestionRequest, Yard,
};
use crate::domain::ports::{PlacementService, PositionStore};

/// Stateless engine over a shared [`PositionStore`].
///
/// Every call reads the store afresh. Place performs its occupancy check and
/// insert as separate statements, so two concurrent placements into the same
/// free cell can both succeed.
pub struct PlacementEngine<S: PositionStore + ?Sized> {
    store: Arc<S>,
}

impl<S: PositionStore + ?Sized> PlacementEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    async fn require_yard(&self, code: &str) -> DomainResult<Yard> {
        self.store
            .resolve_yard(code)
            .await?
            .ok_or_else(|| DomainError::YardNotFound(code.to_string()))
    }

    async fn require_block(&self, yard: &Yard, code: &str) -> DomainResult<Block> {
        self.store
            .resolve_block(yard.id, code)
            .await?
            .ok_or_else(|| DomainError::BlockNotFound {
                yard: yard.code.clone(),
                block: code.to_string(),
            })
    }

    /// Search one block's matching plan, if it has one.
    async fn search_block(&self, block: &Block, spec: &ContainerSpec) -> DomainResult<Option<Cell>> {
        let Some(plan) = self.store.find_plan(block.id, spec).await? else {
            debug!(block = %block.code, spec = %spec, "no matching plan, skipping block");
            return Ok(None);
        };

        let records = self
            .store
            .occupied_in_rect(block.id, plan.slots(), plan.rows())
            .await?;
        let occupancy = Occupancy::from_records(&records);

        Ok(find_free_cell(&plan, block, spec.size, &occupancy))
    }
}

#[async_trait]
impl<S: PositionStore + ?Sized + 'static> PlacementService for PlacementEngine<S> {
    async fn suggest(&self, request: &SuggestionRequest) -> DomainResult<Position> {
        let spec = request.spec()?;
        let yard = self.require_yard(&request.yard).await?;

        for block in self.store.list_blocks(yard.id).await? {
            if let Some(cell) = self.search_block(&block, &spec).await? {
                let position = Position::new(block.code, cell);
                debug!(yard = %yard.code, position = %position, spec = %spec, "suggested position");
                return Ok(position);
            }
        }

        Err(DomainError::NoAvailablePosition(spec.to_string()))
    }

    async fn place(&self, request: &PlacementRequest) -> DomainResult<ContainerRecord> {
        require_container_number(&request.container_number)?;

        let yard = self.require_yard(&request.yard).await?;
        let block = self.require_block(&yard, &request.block).await?;

        // Placement does not take a caller-chosen spec yet.
        let spec = ContainerSpec::reference();
        let cell = Cell::new(request.slot, request.row, request.tier);
        block.validate_footprint(cell, spec.size)?;

        if self.store.find_container(&request.container_number).await?.is_some() {
            return Err(DomainError::DuplicateContainer(request.container_number.clone()));
        }

        if self.store.is_occupied(block.id, cell, spec.size).await? {
            return Err(DomainError::PositionOccupied {
                block: block.code,
                slot: cell.slot,
                row: cell.row,
                tier: cell.tier,
            });
        }

        // Each supporting cell is checked on its own.
        for below in cell.footprint(spec.size).filter_map(Cell::below) {
            if !self.store.is_occupied(block.id, below, ContainerSize::Twenty).await? {
                return Err(DomainError::UnsupportedTier(cell.tier));
            }
        }

        let record = self
            .store
            .insert_container(&NewContainer {
                number: request.container_number.clone(),
                yard_id: yard.id,
                block_id: block.id,
                cell,
                spec,
            })
            .await?;

        info!(
            container = %record.number,
            yard = %yard.code,
            block = %block.code,
            slot = cell.slot,
            row = cell.row,
            tier = cell.tier,
            "container placed"
        );
        Ok(record)
    }

    async fn pickup(&self, request: &PickupRequest) -> DomainResult<ContainerRecord> {
        require_container_number(&request.container_number)?;

        // The yard must exist, but the container is looked up by number alone.
        let yard = self.require_yard(&request.yard).await?;
        let record = self
            .store
            .find_container(&request.container_number)
            .await?
            .ok_or_else(|| DomainError::ContainerNotFound(request.container_number.clone()))?;

        for cell in record.footprint() {
            if self.store.is_blocked_above(record.block_id, cell).await? {
                return Err(DomainError::ContainerBlocked(record.number.clone()));
            }
        }

        self.store.delete_container(&record.number).await?;

        info!(container = %record.number, yard = %yard.code, "container picked up");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::{create_migrated_test_pool, SqlitePositionStore};
    use crate::domain::errors::ErrorKind;
    use crate::domain::models::{NewBlock, NewPlan, NewYard};
    use crate::domain::ports::LayoutRepository;

    async fn setup() -> PlacementEngine<SqlitePositionStore> {
        let store = Arc::new(SqlitePositionStore::new(create_migrated_test_pool().await.unwrap()));
        let yard = store
            .create_yard(&NewYard {
                code: "YRD1".into(),
                ..NewYard::default()
            })
            .await
            .unwrap();
        let block = store
            .create_block(&NewBlock {
                yard_id: yard.id,
                code: "A1".into(),
                name: String::new(),
                max_slot: 10,
                max_row: 2,
                max_tier: 3,
            })
            .await
            .unwrap();
        store
            .create_plan(&NewPlan {
                block_id: block.id,
                slot_start: 1,
                slot_end: 10,
                row_start: 1,
                row_end: 2,
                spec: ContainerSpec::reference(),
                stacking_priority: String::new(),
            })
            .await
            .unwrap();
        PlacementEngine::new(store)
    }

    fn dry_twenty() -> SuggestionRequest {
        SuggestionRequest::new("YRD1", "", 20, 8.6, "DRY")
    }

    #[tokio::test]
    async fn test_suggest_then_place_advances_row() {
        let engine = setup().await;

        let first = engine.suggest(&dry_twenty()).await.unwrap();
        assert_eq!(first, Position::new("A1", Cell::new(1, 1, 1)));

        engine
            .place(&PlacementRequest::new("YRD1", "ALFI000001", "A1", 1, 1, 1))
            .await
            .unwrap();

        let second = engine.suggest(&dry_twenty()).await.unwrap();
        assert_eq!(second, Position::new("A1", Cell::new(1, 2, 1)));
    }

    #[tokio::test]
    async fn test_invalid_spec_is_validation_error() {
        let engine = setup().await;
        let err = engine
            .suggest(&SuggestionRequest::new("YRD1", "", 30, 8.6, "DRY"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_no_matching_plan_is_no_available_position() {
        let engine = setup().await;
        let err = engine
            .suggest(&SuggestionRequest::new("YRD1", "", 40, 9.6, "REEFER"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NoAvailablePosition(_)));
    }

    #[tokio::test]
    async fn test_place_rejects_floating_container() {
        let engine = setup().await;
        let err = engine
            .place(&PlacementRequest::new("YRD1", "ALFI000001", "A1", 1, 1, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedTier(2)));
    }

    #[tokio::test]
    async fn test_place_rejects_occupied_and_duplicate() {
        let engine = setup().await;
        engine
            .place(&PlacementRequest::new("YRD1", "ALFI000001", "A1", 3, 1, 1))
            .await
            .unwrap();

        let occupied = engine
            .place(&PlacementRequest::new("YRD1", "ALFI000002", "A1", 3, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(occupied, DomainError::PositionOccupied { .. }));

        let duplicate = engine
            .place(&PlacementRequest::new("YRD1", "ALFI000001", "A1", 4, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(duplicate, DomainError::DuplicateContainer(_)));
    }

    #[tokio::test]
    async fn test_place_out_of_bounds() {
        let engine = setup().await;
        let err = engine
            .place(&PlacementRequest::new("YRD1", "ALFI000001", "A1", 11, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPosition(_)));
    }

    #[tokio::test]
    async fn test_pickup_blocked_then_released() {
        let engine = setup().await;
        engine
            .place(&PlacementRequest::new("YRD1", "BOTTOM", "A1", 1, 1, 1))
            .await
            .unwrap();
        engine
            .place(&PlacementRequest::new("YRD1", "TOP", "A1", 1, 1, 2))
            .await
            .unwrap();

        let err = engine.pickup(&PickupRequest::new("YRD1", "BOTTOM")).await.unwrap_err();
        assert!(matches!(err, DomainError::ContainerBlocked(_)));

        engine.pickup(&PickupRequest::new("YRD1", "TOP")).await.unwrap();
        let removed = engine.pickup(&PickupRequest::new("YRD1", "BOTTOM")).await.unwrap();
        assert_eq!(removed.cell(), Cell::new(1, 1, 1));
    }

    #[tokio::test]
    async fn test_pickup_unknown_container() {
        let engine = setup().await;
        let err = engine.pickup(&PickupRequest::new("YRD1", "GHOST")).await.unwrap_err();
        assert!(matches!(err, DomainError::ContainerNotFound(_)));

        let err = engine.pickup(&PickupRequest::new("NOPE", "GHOST")).await.unwrap_err();
        assert!(matches!(err, DomainError::YardNotFound(_)));
    }
}
