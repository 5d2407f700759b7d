//! Free-cell search over a single placement plan.
//!
//! The search is a pure function of the plan, the block bounds and the
//! occupancy snapshot, so identical inputs always produce the same winner.

use std::collections::HashSet;

use crate::domain::models::{Block, Cell, ContainerRecord, ContainerSize, PlacementPlan};

/// Set of cells covered by active containers.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashSet<Cell>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from stored records, marking the full footprint of each.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ContainerRecord>) -> Self {
        let mut occupancy = Self::new();
        for record in records {
            occupancy.mark(record.cell(), record.spec.size);
        }
        occupancy
    }

    pub fn mark(&mut self, cell: Cell, size: ContainerSize) {
        self.cells.extend(cell.footprint(size));
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether a container of `size` could sit at `cell`: every footprint
    /// cell is free, and on upper tiers every cell below is occupied.
    pub fn accepts(&self, cell: Cell, size: ContainerSize) -> bool {
        if cell.footprint(size).any(|c| self.contains(c)) {
            return false;
        }

        cell.footprint(size)
            .all(|c| c.below().map_or(true, |below| self.contains(below)))
    }
}

/// First acceptable cell in tier, then slot, then row order.
///
/// Slots and rows come from the plan rectangle as stored, and tiers from the
/// block. A 40ft request never anchors on the last slot of the rectangle.
pub fn find_free_cell(
    plan: &PlacementPlan,
    block: &Block,
    size: ContainerSize,
    occupancy: &Occupancy,
) -> Option<Cell> {
    let span = size.span();

    for tier in 1..=block.max_tier {
        for slot in plan.slot_start..=plan.slot_end {
            if slot + span - 1 > plan.slot_end {
                continue;
            }
            for row in plan.row_start..=plan.row_end {
                let cell = Cell::new(slot, row, tier);
                if occupancy.accepts(cell, size) {
                    return Some(cell);
                }
            }
        }
    }

    None
}
