//! Bulk suggest and bulk place commands.

use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::output::{list_table, output, spinner, status_mark, CommandOutput};
use crate::domain::models::{Config, PlacementRequest, SuggestionRequest};
use crate::infrastructure::setup::YardServices;
use crate::services::{BulkSummary, PlacementOutcome, SuggestionOutcome, SuggestionResult};

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// JSON or YAML file holding a list of requests
    pub file: PathBuf,
}

/// Read a request list; `.json` files are parsed as JSON, anything else as YAML.
pub fn read_requests<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read request file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON requests in {}", path.display()))
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML requests in {}", path.display()))
    }
}

#[derive(Debug, Serialize)]
pub struct BulkOutput<O> {
    pub summary: BulkSummary,
    pub results: Vec<O>,
}

impl CommandOutput for BulkOutput<SuggestionOutcome> {
    fn to_human(&self) -> String {
        let mut table = list_table(&["container", "status", "position / error"]);
        for outcome in &self.results {
            let detail = match &outcome.result {
                SuggestionResult::SuggestedPosition(position) => position.to_string(),
                SuggestionResult::Error(message) => message.clone(),
            };
            table.add_row(vec![
                outcome.container_number.clone(),
                status_mark(outcome.position().is_some()),
                detail,
            ]);
        }
        format!("{}\n{}", summary_line(&self.summary), table)
    }
}

impl CommandOutput for BulkOutput<PlacementOutcome> {
    fn to_human(&self) -> String {
        let mut table = list_table(&["container", "status", "error"]);
        for outcome in &self.results {
            table.add_row(vec![
                outcome.container_number.clone(),
                status_mark(outcome.success),
                outcome.error.clone().unwrap_or_default(),
            ]);
        }
        format!("{}\n{}", summary_line(&self.summary), table)
    }
}

fn summary_line(summary: &BulkSummary) -> String {
    format!(
        "{} request(s): {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    )
}

pub async fn suggest(args: BulkArgs, config: &Config, json_mode: bool) -> Result<()> {
    let requests: Vec<SuggestionRequest> = read_requests(&args.file)?;
    let services = YardServices::open(config).await?;

    let progress = spinner(format!("Suggesting positions for {} container(s)", requests.len()), json_mode);
    let results = services.bulk.bulk_suggest(requests).await;
    progress.finish_and_clear();

    output(
        &BulkOutput {
            summary: BulkSummary::from_outcomes(&results),
            results,
        },
        json_mode,
    );
    Ok(())
}

pub async fn place(args: BulkArgs, config: &Config, json_mode: bool) -> Result<()> {
    let requests: Vec<PlacementRequest> = read_requests(&args.file)?;
    let services = YardServices::open(config).await?;

    let progress = spinner(format!("Placing {} container(s)", requests.len()), json_mode);
    let results = services.bulk.bulk_place(requests).await;
    progress.finish_and_clear();

    output(
        &BulkOutput {
            summary: BulkSummary::from_outcomes(&results),
            results,
        },
        json_mode,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_json_and_yaml_requests() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("requests.json");
        fs::write(
            &json_path,
            r#"[{"yard":"YRD1","container_number":"A","container_size":20,"container_height":8.6,"container_type":"DRY"}]"#,
        )
        .unwrap();
        let from_json: Vec<SuggestionRequest> = read_requests(&json_path).unwrap();
        assert_eq!(from_json[0].container_number, "A");

        let yaml_path = dir.path().join("requests.yaml");
        fs::write(
            &yaml_path,
            "- yard: YRD1\n  container_number: B\n  block: A1\n  slot: 1\n  row: 1\n  tier: 1\n",
        )
        .unwrap();
        let from_yaml: Vec<PlacementRequest> = read_requests(&yaml_path).unwrap();
        assert_eq!(from_yaml[0].block, "A1");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(read_requests::<SuggestionRequest>(&path).is_err());
    }
}
