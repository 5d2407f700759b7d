//! Implementation of the `yardplan containers` command.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;

use crate::cli::output::{list_table, output, render_list, CommandOutput};
use crate::domain::errors::DomainError;
use crate::domain::models::{Config, ContainerRecord};
use crate::domain::ports::{LayoutRepository, PositionStore};
use crate::infrastructure::setup::open_store;

#[derive(Args, Debug)]
pub struct ContainersArgs {
    /// Yard code
    #[arg(long)]
    pub yard: String,

    /// Restrict to one block
    #[arg(long)]
    pub block: Option<String>,
}

/// A placed container as shown to operators.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerView {
    pub container_number: String,
    pub block: String,
    pub slot: u32,
    pub row: u32,
    pub tier: u32,
    pub container_size: u32,
    pub container_height: f64,
    pub container_type: String,
    pub placed_at: String,
}

impl ContainerView {
    pub fn new(record: &ContainerRecord, block: impl Into<String>) -> Self {
        Self {
            container_number: record.number.clone(),
            block: block.into(),
            slot: record.slot,
            row: record.row,
            tier: record.tier,
            container_size: record.spec.size.feet(),
            container_height: record.spec.height.feet(),
            container_type: record.spec.container_type.to_string(),
            placed_at: record.placed_at.to_rfc3339(),
        }
    }

    pub fn position(&self) -> String {
        format!("{}/{}/{}/{}", self.block, self.slot, self.row, self.tier)
    }
}

#[derive(Debug, Serialize)]
pub struct ContainersOutput {
    pub yard: String,
    pub containers: Vec<ContainerView>,
}

impl CommandOutput for ContainersOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["number", "position", "size", "height", "type", "placed at"]);
        for c in &self.containers {
            table.add_row(vec![
                c.container_number.clone(),
                c.position(),
                c.container_size.to_string(),
                format!("{:.1}", c.container_height),
                c.container_type.clone(),
                c.placed_at.clone(),
            ]);
        }
        render_list("container", &table, self.containers.len())
    }
}

pub async fn execute(args: ContainersArgs, config: &Config, json_mode: bool) -> Result<()> {
    let store = open_store(config).await?;

    let yard = store
        .resolve_yard(&args.yard)
        .await?
        .ok_or_else(|| DomainError::YardNotFound(args.yard.clone()))?;

    let blocks = store.list_blocks(yard.id).await?;
    let block_filter = match args.block {
        Some(ref code) => Some(
            blocks
                .iter()
                .find(|b| &b.code == code)
                .map(|b| b.id)
                .ok_or_else(|| DomainError::BlockNotFound {
                    yard: yard.code.clone(),
                    block: code.clone(),
                })?,
        ),
        None => None,
    };
    let block_codes: HashMap<i64, &str> = blocks.iter().map(|b| (b.id, b.code.as_str())).collect();

    let records = store
        .list_containers(yard.id, block_filter)
        .await
        .context("Failed to list containers")?;
    let containers = records
        .iter()
        .map(|r| ContainerView::new(r, block_codes.get(&r.block_id).copied().unwrap_or("?")))
        .collect();

    output(
        &ContainersOutput {
            yard: yard.code,
            containers,
        },
        json_mode,
    );
    Ok(())
}
