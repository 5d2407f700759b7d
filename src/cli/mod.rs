//! Operator command line for the yard placement engine.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::domain::errors::{DomainError, ErrorKind};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "yardplan")]
#[command(about = "Container yard placement: suggest, place and pick up containers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .yardplan/config.yaml and local.yaml)
    #[arg(short, long, global = true, env = "YARDPLAN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the configuration directory and database
    Init(commands::init::InitArgs),
    /// Load yards, blocks and placement plans from a YAML layout
    Seed(commands::seed::SeedArgs),
    /// Suggest a free position for a container spec
    Suggest(commands::placement::SuggestArgs),
    /// Place a container at an explicit position
    Place(commands::placement::PlaceArgs),
    /// Pick up a placed container
    Pickup(commands::placement::PickupArgs),
    /// Suggest positions for every request in a file
    BulkSuggest(commands::bulk::BulkArgs),
    /// Place every request in a file
    BulkPlace(commands::bulk::BulkArgs),
    /// List active containers in a yard
    Containers(commands::containers::ContainersArgs),
}

/// Load configuration from an explicit file or the project defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &config, json).await,
        Commands::Seed(args) => commands::seed::execute(args, &config, json).await,
        Commands::Suggest(args) => commands::placement::suggest(args, &config, json).await,
        Commands::Place(args) => commands::placement::place(args, &config, json).await,
        Commands::Pickup(args) => commands::placement::pickup(args, &config, json).await,
        Commands::BulkSuggest(args) => commands::bulk::suggest(args, &config, json).await,
        Commands::BulkPlace(args) => commands::bulk::place(args, &config, json).await,
        Commands::Containers(args) => commands::containers::execute(args, &config, json).await,
    }
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::NotFound => "not_found",
        ErrorKind::Conflict => "conflict",
        ErrorKind::Store => "store",
    }
}

/// Print an error in the requested format and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let kind = err.downcast_ref::<DomainError>().map(|e| kind_label(e.kind()));

    if json_mode {
        let body = serde_json::json!({
            "error": format!("{err:#}"),
            "kind": kind,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }

    std::process::exit(1);
}
