//! `commentscope analyze <comments.json>`: score saved comments.

use crate::audit::RunLog;
use crate::cli::output::{self, Styled};
use crate::export;
use crate::extraction::CommentRecord;
use crate::platform::Platform;
use crate::sentiment::{self, Analysis};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::warn;

/// Run the analyze command.
pub async fn run(input: &Path, out: Option<PathBuf>, platform: Platform) -> Result<()> {
    let start = Instant::now();
    let data = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let comments: Vec<CommentRecord> = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a comment list", input.display()))?;

    let result = analyze_and_export(&comments, out, platform);
    log_run(&comments, start, result.is_ok());
    result.map(|_| ())
}

/// Analyze `comments`, print the summary, and write the CSV.
/// Shared by `analyze` and `scrape`.
pub fn analyze_and_export(
    comments: &[CommentRecord],
    out: Option<PathBuf>,
    platform: Platform,
) -> Result<Analysis> {
    let s = Styled::new();
    let analysis = sentiment::analyze(comments).context("error analyzing comments")?;
    let path = out.unwrap_or_else(|| PathBuf::from(export::default_file_name(platform)));
    export::write_csv(&path, &analysis.comments)?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "summary": analysis.summary,
            "csv": path.display().to_string(),
        }));
    } else if !output::is_quiet() {
        eprintln!();
        output::print_summary(&s, &analysis.summary);
        eprintln!();
        eprintln!(
            "  {} Successfully analyzed {} comments, wrote {}",
            s.ok_sym(),
            comments.len(),
            path.display()
        );
    }

    Ok(analysis)
}

fn log_run(comments: &[CommentRecord], start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    let logged = RunLog::default_log().and_then(|mut log| {
        log.log_run(
            "analyze",
            None,
            None,
            comments.len(),
            start.elapsed().as_millis() as u64,
            status,
        )
    });
    if let Err(e) = logged {
        warn!("could not write run log: {e:#}");
    }
}
