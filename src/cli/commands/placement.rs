//! Single suggest, place and pickup commands.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::containers::ContainerView;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, PickupRequest, PlacementRequest, Position, SuggestionRequest};
use crate::domain::ports::{PlacementService, PositionStore};
use crate::infrastructure::setup::YardServices;

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Yard code
    #[arg(long)]
    pub yard: String,

    /// Container length in feet: 20 or 40
    #[arg(long, default_value_t = 20)]
    pub size: u32,

    /// Container height in feet: 8.6 or 9.6
    #[arg(long, default_value_t = 8.6)]
    pub height: f64,

    /// Container type: DRY, REEFER or OPEN_TOP
    #[arg(long = "type", default_value = "DRY")]
    pub container_type: String,
}

#[derive(Args, Debug)]
pub struct PlaceArgs {
    /// Yard code
    #[arg(long)]
    pub yard: String,

    /// Container number
    #[arg(long)]
    pub number: String,

    /// Block code
    #[arg(long)]
    pub block: String,

    #[arg(long)]
    pub slot: u32,

    #[arg(long)]
    pub row: u32,

    #[arg(long)]
    pub tier: u32,
}

#[derive(Args, Debug)]
pub struct PickupArgs {
    /// Yard code
    #[arg(long)]
    pub yard: String,

    /// Container number
    #[arg(long)]
    pub number: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestOutput {
    pub yard: String,
    pub position: Position,
}

impl CommandOutput for SuggestOutput {
    fn to_human(&self) -> String {
        format!(
            "Suggested position in {}: block {} slot {} row {} tier {}",
            self.yard, self.position.block, self.position.slot, self.position.row, self.position.tier
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ContainerActionOutput {
    pub action: &'static str,
    pub yard: String,
    pub container: ContainerView,
}

impl CommandOutput for ContainerActionOutput {
    fn to_human(&self) -> String {
        format!(
            "Container {} {} at {} in {}",
            self.container.container_number,
            self.action,
            self.container.position(),
            self.yard
        )
    }
}

pub async fn suggest(args: SuggestArgs, config: &Config, json_mode: bool) -> Result<()> {
    let services = YardServices::open(config).await?;
    let request = SuggestionRequest::new(&args.yard, "", args.size, args.height, &args.container_type);
    let position = services.placement.suggest(&request).await?;

    output(
        &SuggestOutput {
            yard: args.yard,
            position,
        },
        json_mode,
    );
    Ok(())
}

pub async fn place(args: PlaceArgs, config: &Config, json_mode: bool) -> Result<()> {
    let services = YardServices::open(config).await?;
    let request = PlacementRequest::new(&args.yard, &args.number, &args.block, args.slot, args.row, args.tier);
    let record = services.placement.place(&request).await?;

    output(
        &ContainerActionOutput {
            action: "placed",
            yard: args.yard,
            container: ContainerView::new(&record, args.block),
        },
        json_mode,
    );
    Ok(())
}

pub async fn pickup(args: PickupArgs, config: &Config, json_mode: bool) -> Result<()> {
    let services = YardServices::open(config).await?;
    let record = services
        .placement
        .pickup(&PickupRequest::new(&args.yard, &args.number))
        .await?;

    let block = services
        .store
        .list_blocks(record.yard_id)
        .await?
        .into_iter()
        .find(|b| b.id == record.block_id)
        .map(|b| b.code)
        .unwrap_or_default();

    output(
        &ContainerActionOutput {
            action: "picked up",
            yard: args.yard,
            container: ContainerView::new(&record, block),
        },
        json_mode,
    );
    Ok(())
}
