//! SQLite implementation of the PositionStore and LayoutRepository ports.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::ops::RangeInclusive;

use super::{parse_coordinate, parse_datetime, parse_spec};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Block, Cell, ContainerRecord, ContainerSize, ContainerSpec, NewBlock, NewContainer, NewPlan,
    NewYard, PlacementPlan, Yard,
};
use crate::domain::ports::{LayoutRepository, PositionStore};

pub struct SqlitePositionStore {
    pool: SqlitePool,
}

impl SqlitePositionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Map a unique-constraint violation to a domain conflict, anything else to a store error.
fn map_unique_violation(err: sqlx::Error, conflict: impl FnOnce() -> DomainError) -> DomainError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => conflict(),
        other => other.into(),
    }
}

#[async_trait]
impl PositionStore for SqlitePositionStore {
    async fn resolve_yard(&self, code: &str) -> DomainResult<Option<Yard>> {
        let row: Option<YardRow> = sqlx::query_as("SELECT * FROM yards WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_blocks(&self, yard_id: i64) -> DomainResult<Vec<Block>> {
        let rows: Vec<BlockRow> = sqlx::query_as("SELECT * FROM blocks WHERE yard_id = ? ORDER BY code")
            .bind(yard_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn resolve_block(&self, yard_id: i64, code: &str) -> DomainResult<Option<Block>> {
        let row: Option<BlockRow> = sqlx::query_as("SELECT * FROM blocks WHERE yard_id = ? AND code = ?")
            .bind(yard_id)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_plan(&self, block_id: i64, spec: &ContainerSpec) -> DomainResult<Option<PlacementPlan>> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"SELECT * FROM placement_plans
               WHERE block_id = ? AND container_size = ? AND container_height = ? AND container_type = ?
               ORDER BY id
               LIMIT 1"#,
        )
        .bind(block_id)
        .bind(i64::from(spec.size.feet()))
        .bind(spec.height.feet())
        .bind(spec.container_type.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn is_occupied(&self, block_id: i64, cell: Cell, size: ContainerSize) -> DomainResult<bool> {
        let slot = i64::from(cell.slot);
        let last_slot = slot + i64::from(size.span()) - 1;

        let hits: i64 = sqlx::query_scalar(
            r#"SELECT EXISTS(
                   SELECT 1 FROM containers
                   WHERE block_id = ? AND row_no = ? AND tier_no = ?
                     AND (slot_no BETWEEN ? AND ? OR (container_size = 40 AND slot_no = ?))
               )"#,
        )
        .bind(block_id)
        .bind(i64::from(cell.row))
        .bind(i64::from(cell.tier))
        .bind(slot)
        .bind(last_slot)
        .bind(slot - 1)
        .fetch_one(&self.pool)
        .await?;

        Ok(hits != 0)
    }

    async fn occupied_in_rect(
        &self,
        block_id: i64,
        slots: RangeInclusive<u32>,
        rows: RangeInclusive<u32>,
    ) -> DomainResult<Vec<ContainerRecord>> {
        let slot_start = i64::from(*slots.start());

        // A 40ft record anchored one slot left of the rectangle spills into it.
        let records: Vec<ContainerRow> = sqlx::query_as(
            r#"SELECT * FROM containers
               WHERE block_id = ? AND row_no BETWEEN ? AND ?
                 AND (slot_no BETWEEN ? AND ? OR (container_size = 40 AND slot_no = ?))
               ORDER BY slot_no, row_no, tier_no"#,
        )
        .bind(block_id)
        .bind(i64::from(*rows.start()))
        .bind(i64::from(*rows.end()))
        .bind(slot_start)
        .bind(i64::from(*slots.end()))
        .bind(slot_start - 1)
        .fetch_all(&self.pool)
        .await?;

        records.into_iter().map(TryInto::try_into).collect()
    }

    async fn is_blocked_above(&self, block_id: i64, cell: Cell) -> DomainResult<bool> {
        let slot = i64::from(cell.slot);

        let hits: i64 = sqlx::query_scalar(
            r#"SELECT EXISTS(
                   SELECT 1 FROM containers
                   WHERE block_id = ? AND row_no = ? AND tier_no > ?
                     AND (slot_no = ? OR (container_size = 40 AND slot_no = ?))
               )"#,
        )
        .bind(block_id)
        .bind(i64::from(cell.row))
        .bind(i64::from(cell.tier))
        .bind(slot)
        .bind(slot - 1)
        .fetch_one(&self.pool)
        .await?;

        Ok(hits != 0)
    }

    async fn insert_container(&self, container: &NewContainer) -> DomainResult<ContainerRecord> {
        let placed_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO containers (container_number, yard_id, block_id, slot_no, row_no, tier_no,
                                       container_size, container_height, container_type, placed_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(&container.number)
        .bind(container.yard_id)
        .bind(container.block_id)
        .bind(i64::from(container.cell.slot))
        .bind(i64::from(container.cell.row))
        .bind(i64::from(container.cell.tier))
        .bind(i64::from(container.spec.size.feet()))
        .bind(container.spec.height.feet())
        .bind(container.spec.container_type.as_str())
        .bind(placed_at.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateContainer(container.number.clone())))?;

        Ok(ContainerRecord {
            id,
            number: container.number.clone(),
            yard_id: container.yard_id,
            block_id: container.block_id,
            slot: container.cell.slot,
            row: container.cell.row,
            tier: container.cell.tier,
            spec: container.spec,
            placed_at,
        })
    }

    async fn delete_container(&self, number: &str) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM containers WHERE container_number = ?")
            .bind(number)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ContainerNotFound(number.to_string()));
        }

        Ok(())
    }

    async fn find_container(&self, number: &str) -> DomainResult<Option<ContainerRecord>> {
        let row: Option<ContainerRow> = sqlx::query_as("SELECT * FROM containers WHERE container_number = ?")
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }
}

#[async_trait]
impl LayoutRepository for SqlitePositionStore {
    async fn create_yard(&self, yard: &NewYard) -> DomainResult<Yard> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO yards (code, name, description, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(&yard.code)
        .bind(&yard.name)
        .bind(&yard.description)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::InvalidRequest(format!("yard '{}' already exists", yard.code)))
        })?;

        Ok(Yard {
            id,
            code: yard.code.clone(),
            name: yard.name.clone(),
            description: yard.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_yards(&self) -> DomainResult<Vec<Yard>> {
        let rows: Vec<YardRow> = sqlx::query_as("SELECT * FROM yards ORDER BY code")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn create_block(&self, block: &NewBlock) -> DomainResult<Block> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO blocks (yard_id, code, name, max_slot, max_row, max_tier, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(block.yard_id)
        .bind(&block.code)
        .bind(&block.name)
        .bind(i64::from(block.max_slot))
        .bind(i64::from(block.max_row))
        .bind(i64::from(block.max_tier))
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::InvalidRequest(format!("block '{}' already exists", block.code)))
        })?;

        Ok(Block {
            id,
            yard_id: block.yard_id,
            code: block.code.clone(),
            name: block.name.clone(),
            max_slot: block.max_slot,
            max_row: block.max_row,
            max_tier: block.max_tier,
            created_at: now,
            updated_at: now,
        })
    }

    async fn create_plan(&self, plan: &NewPlan) -> DomainResult<PlacementPlan> {
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO placement_plans (block_id, slot_start, slot_end, row_start, row_end,
                                            container_size, container_height, container_type,
                                            stacking_priority, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING id"#,
        )
        .bind(plan.block_id)
        .bind(i64::from(plan.slot_start))
        .bind(i64::from(plan.slot_end))
        .bind(i64::from(plan.row_start))
        .bind(i64::from(plan.row_end))
        .bind(i64::from(plan.spec.size.feet()))
        .bind(plan.spec.height.feet())
        .bind(plan.spec.container_type.as_str())
        .bind(&plan.stacking_priority)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        Ok(PlacementPlan {
            id,
            block_id: plan.block_id,
            slot_start: plan.slot_start,
            slot_end: plan.slot_end,
            row_start: plan.row_start,
            row_end: plan.row_end,
            spec: plan.spec,
            stacking_priority: plan.stacking_priority.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn list_plans(&self, block_id: i64) -> DomainResult<Vec<PlacementPlan>> {
        let rows: Vec<PlanRow> =
            sqlx::query_as("SELECT * FROM placement_plans WHERE block_id = ? ORDER BY slot_start, row_start")
                .bind(block_id)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_containers(&self, yard_id: i64, block_id: Option<i64>) -> DomainResult<Vec<ContainerRecord>> {
        let rows: Vec<ContainerRow> = sqlx::query_as(
            r#"SELECT * FROM containers
               WHERE yard_id = ? AND (? IS NULL OR block_id = ?)
               ORDER BY block_id, slot_no, row_no, tier_no"#,
        )
        .bind(yard_id)
        .bind(block_id)
        .bind(block_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct YardRow {
    id: i64,
    code: String,
    name: String,
    description: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<YardRow> for Yard {
    type Error = DomainError;

    fn try_from(row: YardRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BlockRow {
    id: i64,
    yard_id: i64,
    code: String,
    name: String,
    max_slot: i64,
    max_row: i64,
    max_tier: i64,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BlockRow> for Block {
    type Error = DomainError;

    fn try_from(row: BlockRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            yard_id: row.yard_id,
            code: row.code,
            name: row.name,
            max_slot: parse_coordinate(row.max_slot, "max_slot")?,
            max_row: parse_coordinate(row.max_row, "max_row")?,
            max_tier: parse_coordinate(row.max_tier, "max_tier")?,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlanRow {
    id: i64,
    block_id: i64,
    slot_start: i64,
    slot_end: i64,
    row_start: i64,
    row_end: i64,
    container_size: i64,
    container_height: f64,
    container_type: String,
    stacking_priority: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<PlanRow> for PlacementPlan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            block_id: row.block_id,
            slot_start: parse_coordinate(row.slot_start, "slot_start")?,
            slot_end: parse_coordinate(row.slot_end, "slot_end")?,
            row_start: parse_coordinate(row.row_start, "row_start")?,
            row_end: parse_coordinate(row.row_end, "row_end")?,
            spec: parse_spec(row.container_size, row.container_height, &row.container_type)?,
            stacking_priority: row.stacking_priority,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ContainerRow {
    id: i64,
    container_number: String,
    yard_id: i64,
    block_id: i64,
    slot_no: i64,
    row_no: i64,
    tier_no: i64,
    container_size: i64,
    container_height: f64,
    container_type: String,
    placed_at: String,
}

impl TryFrom<ContainerRow> for ContainerRecord {
    type Error = DomainError;

    fn try_from(row: ContainerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            number: row.container_number,
            yard_id: row.yard_id,
            block_id: row.block_id,
            slot: parse_coordinate(row.slot_no, "slot_no")?,
            row: parse_coordinate(row.row_no, "row_no")?,
            tier: parse_coordinate(row.tier_no, "tier_no")?,
            spec: parse_spec(row.container_size, row.container_height, &row.container_type)?,
            placed_at: parse_datetime(&row.placed_at)?,
        })
    }
}
