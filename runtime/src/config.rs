//! Environment-driven paths and settings.

use std::path::PathBuf;

/// Data directory: `COMMENTSCOPE_HOME`, else `~/.commentscope`.
pub fn commentscope_home() -> PathBuf {
    if let Ok(p) = std::env::var("COMMENTSCOPE_HOME") {
        return PathBuf::from(p);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".commentscope")
}

/// Browser binary override from `COMMENTSCOPE_CHROMIUM_PATH`.
pub fn chromium_path() -> Option<PathBuf> {
    std::env::var_os("COMMENTSCOPE_CHROMIUM_PATH")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Where the run log is appended.
pub fn run_log_path() -> PathBuf {
    commentscope_home().join("runs.jsonl")
}
