//! CLI subcommand implementations for the commentscope binary.

pub mod analyze_cmd;
pub mod classify_cmd;
pub mod output;
pub mod progress;
pub mod run_cmd;
pub mod scrape_cmd;
