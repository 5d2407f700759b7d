use chrono::Utc;
use proptest::prelude::*;
use yardplan::domain::models::{Block, Cell, ContainerHeight, ContainerSize, ContainerSpec, ContainerType, PlacementPlan};
use yardplan::services::{find_free_cell, Occupancy};

fn block(max_slot: u32, max_row: u32, max_tier: u32) -> Block {
    Block {
        id: 1,
        yard_id: 1,
        code: "P1".into(),
        name: String::new(),
        max_slot,
        max_row,
        max_tier,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn plan(slot_start: u32, slot_end: u32, row_start: u32, row_end: u32, size: ContainerSize) -> PlacementPlan {
    PlacementPlan {
        id: 1,
        block_id: 1,
        slot_start,
        slot_end,
        row_start,
        row_end,
        spec: ContainerSpec::new(size, ContainerHeight::Standard, ContainerType::Dry),
        stacking_priority: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn size_strategy() -> impl Strategy<Value = ContainerSize> {
    prop_oneof![Just(ContainerSize::Twenty), Just(ContainerSize::Forty)]
}

/// Fill the block greedily with `fills` containers, each at the search winner.
fn fill(plan: &PlacementPlan, block: &Block, sizes: &[ContainerSize]) -> Occupancy {
    let mut occupancy = Occupancy::new();
    for &size in sizes {
        if let Some(cell) = find_free_cell(plan, block, size, &occupancy) {
            occupancy.mark(cell, size);
        }
    }
    occupancy
}

proptest! {
    /// Property: the same snapshot always yields the same winner
    #[test]
    fn prop_search_is_deterministic(
        dims in (1u32..8, 1u32..4, 1u32..4),
        fills in prop::collection::vec(size_strategy(), 0..20),
        size in size_strategy(),
    ) {
        let (max_slot, max_row, max_tier) = dims;
        let block = block(max_slot, max_row, max_tier);
        let plan = plan(1, max_slot, 1, max_row, size);
        let occupancy = fill(&plan, &block, &fills);

        let first = find_free_cell(&plan, &block, size, &occupancy);
        let second = find_free_cell(&plan, &block, size, &occupancy.clone());
        prop_assert_eq!(first, second);
    }

    /// Property: a winner is inside the plan, free, and fully supported
    #[test]
    fn prop_winner_is_stack_legal(
        dims in (1u32..8, 1u32..4, 1u32..4),
        fills in prop::collection::vec(size_strategy(), 0..20),
        size in size_strategy(),
    ) {
        let (max_slot, max_row, max_tier) = dims;
        let block = block(max_slot, max_row, max_tier);
        let plan = plan(1, max_slot, 1, max_row, size);
        let occupancy = fill(&plan, &block, &fills);

        if let Some(cell) = find_free_cell(&plan, &block, size, &occupancy) {
            for c in cell.footprint(size) {
                prop_assert!(c.slot >= 1 && c.slot <= max_slot);
                prop_assert!(c.row >= 1 && c.row <= max_row);
                prop_assert!(c.tier >= 1 && c.tier <= max_tier);
                prop_assert!(!occupancy.contains(c));
                if let Some(below) = c.below() {
                    prop_assert!(occupancy.contains(below));
                }
            }
        }
    }

    /// Property: no cell earlier in (tier, slot, row) order was acceptable
    #[test]
    fn prop_winner_is_first_in_scan_order(
        dims in (1u32..6, 1u32..3, 1u32..3),
        fills in prop::collection::vec(size_strategy(), 0..12),
        size in size_strategy(),
    ) {
        let (max_slot, max_row, max_tier) = dims;
        let block = block(max_slot, max_row, max_tier);
        let plan = plan(1, max_slot, 1, max_row, size);
        let occupancy = fill(&plan, &block, &fills);
        let winner = find_free_cell(&plan, &block, size, &occupancy);

        for tier in 1..=max_tier {
            for slot in 1..=max_slot {
                if slot + size.span() - 1 > max_slot {
                    continue;
                }
                for row in 1..=max_row {
                    let cell = Cell::new(slot, row, tier);
                    if Some(cell) == winner {
                        return Ok(());
                    }
                    prop_assert!(!occupancy.accepts(cell, size));
                }
            }
        }
        prop_assert!(winner.is_none());
    }

    /// Property: a 40ft winner never anchors on the last slot of the plan
    #[test]
    fn prop_forty_fits_inside_plan(
        slot_start in 1u32..6,
        width in 0u32..4,
        max_tier in 1u32..3,
    ) {
        let slot_end = slot_start + width;
        let block = block(20, 1, max_tier);
        let plan = plan(slot_start, slot_end, 1, 1, ContainerSize::Forty);

        let winner = find_free_cell(&plan, &block, ContainerSize::Forty, &Occupancy::new());
        if width == 0 {
            prop_assert!(winner.is_none());
        } else {
            prop_assert_eq!(winner, Some(Cell::new(slot_start, 1, 1)));
        }
    }
}
