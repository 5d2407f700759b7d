//! Implementation of the `yardplan init` command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::setup::{create_config_dir, create_config_file, open_store, SetupPaths};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub config_dir: PathBuf,
    pub config_written: bool,
    pub database: String,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![format!("Initialized yardplan in {}", self.config_dir.display())];
        if self.config_written {
            lines.push("  - wrote config.yaml".to_string());
        } else {
            lines.push("  - kept existing config.yaml (use --force to overwrite)".to_string());
        }
        lines.push(format!("  - database ready at {}", self.database));
        lines.join("\n")
    }
}

pub async fn execute(args: InitArgs, config: &Config, json_mode: bool) -> Result<()> {
    let paths = SetupPaths::new()?;
    create_config_dir(&paths)?;
    let config_written = create_config_file(&paths, args.force)?;

    let store = open_store(config).await?;
    store.pool().close().await;

    output(
        &InitOutput {
            config_dir: paths.config_dir,
            config_written,
            database: config.database.path.clone(),
        },
        json_mode,
    );
    Ok(())
}
