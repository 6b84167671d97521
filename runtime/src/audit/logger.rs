//! JSONL run log: one line per scrape or analysis.

use crate::config;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// A single logged run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub timestamp: String,
    pub operation: String,
    pub url: Option<String>,
    pub session_id: Option<String>,
    pub records: usize,
    pub duration_ms: u64,
    pub status: String,
}

/// Append-only JSONL run log.
pub struct RunLog {
    file: File,
}

impl RunLog {
    /// Open or create the log file.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open run log: {}", path.display()))?;

        Ok(Self { file })
    }

    /// Open the default log at `~/.commentscope/runs.jsonl`.
    pub fn default_log() -> Result<Self> {
        Self::open(&config::run_log_path())
    }

    pub fn log(&mut self, event: &RunEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.file, "{json}")?;
        Ok(())
    }

    /// Log a finished run with the current time.
    pub fn log_run(
        &mut self,
        operation: &str,
        url: Option<&str>,
        session_id: Option<&str>,
        records: usize,
        duration_ms: u64,
        status: &str,
    ) -> Result<()> {
        self.log(&RunEvent {
            timestamp: Utc::now().to_rfc3339(),
            operation: operation.to_string(),
            url: url.map(String::from),
            session_id: session_id.map(String::from),
            records,
            duration_ms,
            status: status.to_string(),
        })
    }
}
