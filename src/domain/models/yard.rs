//! Yard reference data: yards, blocks and placement plans.

use chrono::{DateTime, Utc};
use std::ops::RangeInclusive;

use super::container::{Cell, ContainerSize, ContainerSpec};
use crate::domain::errors::{DomainError, DomainResult};

/// A container yard (terminal).
#[derive(Debug, Clone, PartialEq)]
pub struct Yard {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A bounded storage area inside a yard.
///
/// Slots, rows and tiers are 1-based inclusive ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: i64,
    pub yard_id: i64,
    pub code: String,
    pub name: String,
    pub max_slot: u32,
    pub max_row: u32,
    pub max_tier: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Block {
    /// Check that a cell lies inside this block's bounds.
    pub fn validate_cell(&self, cell: Cell) -> DomainResult<()> {
        if cell.slot < 1 || cell.slot > self.max_slot {
            return Err(DomainError::InvalidPosition(format!(
                "slot must be between 1 and {}",
                self.max_slot
            )));
        }
        if cell.row < 1 || cell.row > self.max_row {
            return Err(DomainError::InvalidPosition(format!(
                "row must be between 1 and {}",
                self.max_row
            )));
        }
        if cell.tier < 1 || cell.tier > self.max_tier {
            return Err(DomainError::InvalidPosition(format!(
                "tier must be between 1 and {}",
                self.max_tier
            )));
        }
        Ok(())
    }

    /// Check that a container of `size` anchored at `cell` fits the block.
    pub fn validate_footprint(&self, cell: Cell, size: ContainerSize) -> DomainResult<()> {
        self.validate_cell(cell)?;
        let last_slot = cell.slot + size.span() - 1;
        if last_slot > self.max_slot {
            return Err(DomainError::InvalidPosition(format!(
                "a {}ft container at slot {} exceeds max slot {}",
                size.feet(),
                cell.slot,
                self.max_slot
            )));
        }
        Ok(())
    }
}

/// Binds a rectangular slot x row region of a block to one container spec.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPlan {
    pub id: i64,
    pub block_id: i64,
    pub slot_start: u32,
    pub slot_end: u32,
    pub row_start: u32,
    pub row_end: u32,
    pub spec: ContainerSpec,
    /// Free-form hint; the search does not use it.
    pub stacking_priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlacementPlan {
    pub fn slots(&self) -> RangeInclusive<u32> {
        self.slot_start..=self.slot_end
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.row_start..=self.row_end
    }
}

/// Input for creating a yard.
#[derive(Debug, Clone, Default)]
pub struct NewYard {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Input for creating a block.
#[derive(Debug, Clone)]
pub struct NewBlock {
    pub yard_id: i64,
    pub code: String,
    pub name: String,
    pub max_slot: u32,
    pub max_row: u32,
    pub max_tier: u32,
}

/// Input for creating a placement plan.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub block_id: i64,
    pub slot_start: u32,
    pub slot_end: u32,
    pub row_start: u32,
    pub row_end: u32,
    pub spec: ContainerSpec,
    pub stacking_priority: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Block {
        Block {
            id: 1,
            yard_id: 1,
            code: "A1".into(),
            name: String::new(),
            max_slot: 10,
            max_row: 2,
            max_tier: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_cell_bounds() {
        let block = block();
        assert!(block.validate_cell(Cell::new(1, 1, 1)).is_ok());
        assert!(block.validate_cell(Cell::new(10, 2, 3)).is_ok());
        assert!(block.validate_cell(Cell::new(0, 1, 1)).is_err());
        assert!(block.validate_cell(Cell::new(11, 1, 1)).is_err());
        assert!(block.validate_cell(Cell::new(1, 3, 1)).is_err());
        assert!(block.validate_cell(Cell::new(1, 1, 4)).is_err());
    }

    #[test]
    fn test_validate_footprint_for_forty() {
        let block = block();
        assert!(block.validate_footprint(Cell::new(9, 1, 1), ContainerSize::Forty).is_ok());
        let err = block
            .validate_footprint(Cell::new(10, 1, 1), ContainerSize::Forty)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidPosition(_)));
        assert!(block.validate_footprint(Cell::new(10, 1, 1), ContainerSize::Twenty).is_ok());
    }
}
