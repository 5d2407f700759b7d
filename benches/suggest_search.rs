//! Benchmarks for the free-cell search.
//!
//! Run with: cargo bench --bench suggest_search

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yardplan::domain::models::{Block, Cell, ContainerHeight, ContainerSize, ContainerSpec, ContainerType, PlacementPlan};
use yardplan::services::{find_free_cell, Occupancy};

fn block(max_slot: u32, max_row: u32, max_tier: u32) -> Block {
    Block {
        id: 1,
        yard_id: 1,
        code: "A1".into(),
        name: String::new(),
        max_slot,
        max_row,
        max_tier,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn plan(block: &Block) -> PlacementPlan {
    PlacementPlan {
        id: 1,
        block_id: block.id,
        slot_start: 1,
        slot_end: block.max_slot,
        row_start: 1,
        row_end: block.max_row,
        spec: ContainerSpec::new(ContainerSize::Twenty, ContainerHeight::Standard, ContainerType::Dry),
        stacking_priority: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Occupy every ground and middle cell so the winner sits on the top tier.
fn nearly_full(block: &Block) -> Occupancy {
    let mut occupancy = Occupancy::new();
    for tier in 1..block.max_tier {
        for slot in 1..=block.max_slot {
            for row in 1..=block.max_row {
                occupancy.mark(Cell::new(slot, row, tier), ContainerSize::Twenty);
            }
        }
    }
    occupancy
}

fn bench_find_free_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_free_cell");

    for max_slot in [10, 40, 120] {
        let block = block(max_slot, 6, 5);
        let plan = plan(&block);
        let empty = Occupancy::new();
        let full = nearly_full(&block);

        group.bench_with_input(BenchmarkId::new("empty_block", max_slot), &max_slot, |b, _| {
            b.iter(|| black_box(find_free_cell(&plan, &block, black_box(ContainerSize::Twenty), &empty)));
        });

        group.bench_with_input(BenchmarkId::new("top_tier_only", max_slot), &max_slot, |b, _| {
            b.iter(|| black_box(find_free_cell(&plan, &block, black_box(ContainerSize::Forty), &full)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find_free_cell);
criterion_main!(benches);
