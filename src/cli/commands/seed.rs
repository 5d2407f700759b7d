//! Implementation of the `yardplan seed` command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::layout::{SeedSummary, YardLayout};
use crate::infrastructure::setup::open_store;

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// YAML layout describing yards, blocks and plans
    pub layout: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct SeedOutput {
    pub layout: PathBuf,
    #[serde(flatten)]
    pub summary: SeedSummary,
}

impl CommandOutput for SeedOutput {
    fn to_human(&self) -> String {
        format!(
            "Seeded {} yard(s), {} block(s) and {} plan(s) from {}",
            self.summary.yards,
            self.summary.blocks,
            self.summary.plans,
            self.layout.display()
        )
    }
}

pub async fn execute(args: SeedArgs, config: &Config, json_mode: bool) -> Result<()> {
    let layout = YardLayout::load_from_file(&args.layout)?;
    let store = open_store(config).await?;
    let summary = layout.apply(store.as_ref()).await?;

    output(
        &SeedOutput {
            layout: args.layout,
            summary,
        },
        json_mode,
    );
    Ok(())
}
