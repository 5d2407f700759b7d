//! Yard layout loader from YAML files
//!
//! A layout describes yards, their blocks and the placement plans of each
//! block. Seeding validates the whole file before writing anything.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::domain::models::{ContainerSize, ContainerSpec, NewBlock, NewPlan, NewYard};
use crate::domain::ports::LayoutRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YardLayout {
    pub yards: Vec<YardTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YardTemplate {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blocks: Vec<BlockTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockTemplate {
    pub code: String,
    #[serde(default)]
    pub name: String,
    pub max_slot: u32,
    pub max_row: u32,
    pub max_tier: u32,
    #[serde(default)]
    pub plans: Vec<PlanTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTemplate {
    pub slot_start: u32,
    pub slot_end: u32,
    pub row_start: u32,
    pub row_end: u32,
    pub container_size: u32,
    pub container_height: f64,
    pub container_type: String,
    #[serde(default)]
    pub stacking_priority: String,
}

/// Counts of records written by a seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub yards: usize,
    pub blocks: usize,
    pub plans: usize,
}

impl YardLayout {
    /// Load a layout from a YAML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading yard layout from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

        Self::from_yaml(&content)
    }

    /// Parse and validate a layout from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let layout: Self = serde_yaml::from_str(yaml).context("Failed to parse YAML layout")?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check bounds and specs of every block and plan.
    pub fn validate(&self) -> Result<()> {
        if self.yards.is_empty() {
            bail!("layout defines no yards");
        }

        for yard in &self.yards {
            if yard.code.trim().is_empty() {
                bail!("yard code cannot be empty");
            }
            for block in &yard.blocks {
                block
                    .validate()
                    .with_context(|| format!("invalid block '{}' in yard '{}'", block.code, yard.code))?;
            }
        }
        Ok(())
    }

    /// Write every yard, block and plan through `repo`.
    pub async fn apply<R: LayoutRepository + ?Sized>(&self, repo: &R) -> Result<SeedSummary> {
        let mut summary = SeedSummary::default();

        for yard_template in &self.yards {
            let yard = repo
                .create_yard(&NewYard {
                    code: yard_template.code.clone(),
                    name: yard_template.name.clone(),
                    description: yard_template.description.clone(),
                })
                .await
                .with_context(|| format!("Failed to create yard '{}'", yard_template.code))?;
            summary.yards += 1;

            for block_template in &yard_template.blocks {
                let block = repo
                    .create_block(&NewBlock {
                        yard_id: yard.id,
                        code: block_template.code.clone(),
                        name: block_template.name.clone(),
                        max_slot: block_template.max_slot,
                        max_row: block_template.max_row,
                        max_tier: block_template.max_tier,
                    })
                    .await
                    .with_context(|| format!("Failed to create block '{}'", block_template.code))?;
                summary.blocks += 1;

                for plan in &block_template.plans {
                    repo.create_plan(&plan.to_new_plan(block.id)?)
                        .await
                        .with_context(|| format!("Failed to create plan in block '{}'", block.code))?;
                    summary.plans += 1;
                }
            }
        }

        info!(
            yards = summary.yards,
            blocks = summary.blocks,
            plans = summary.plans,
            "yard layout seeded"
        );
        Ok(summary)
    }
}

impl BlockTemplate {
    fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            bail!("block code cannot be empty");
        }
        if self.max_slot == 0 || self.max_row == 0 || self.max_tier == 0 {
            bail!("max_slot, max_row and max_tier must be at least 1");
        }

        for plan in &self.plans {
            let spec = plan.spec()?;
            if plan.slot_start == 0 || plan.slot_start > plan.slot_end || plan.slot_end > self.max_slot {
                bail!(
                    "plan slots {}..={} must lie within 1..={}",
                    plan.slot_start,
                    plan.slot_end,
                    self.max_slot
                );
            }
            if plan.row_start == 0 || plan.row_start > plan.row_end || plan.row_end > self.max_row {
                bail!(
                    "plan rows {}..={} must lie within 1..={}",
                    plan.row_start,
                    plan.row_end,
                    self.max_row
                );
            }
            if spec.size == ContainerSize::Forty && plan.slot_start == plan.slot_end {
                bail!("a 40ft plan needs at least two slots");
            }
        }
        Ok(())
    }
}

impl PlanTemplate {
    fn spec(&self) -> Result<ContainerSpec> {
        Ok(ContainerSpec::parse(
            self.container_size,
            self.container_height,
            &self.container_type,
        )?)
    }

    fn to_new_plan(&self, block_id: i64) -> Result<NewPlan> {
        Ok(NewPlan {
            block_id,
            slot_start: self.slot_start,
            slot_end: self.slot_end,
            row_start: self.row_start,
            row_end: self.row_end,
            spec: self.spec()?,
            stacking_priority: self.stacking_priority.clone(),
        })
    }
}
