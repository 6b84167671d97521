//! `commentscope run <command.json> <url>`: accept a start command.

use crate::cli::scrape_cmd::{self, ScrapeArgs};
use crate::platform::Command;
use anyhow::{Context, Result};
use std::path::Path;

/// Read and validate a command file, then scrape `url` with defaults.
pub async fn run(command_file: &Path, url: &str) -> Result<()> {
    let data = std::fs::read_to_string(command_file)
        .with_context(|| format!("reading {}", command_file.display()))?;
    let command: Command = serde_json::from_str(&data).context("malformed command")?;
    let platform = command.validate()?;

    scrape_cmd::run(ScrapeArgs::new(url, platform)).await
}
