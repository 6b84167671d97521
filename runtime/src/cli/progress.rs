// Copyright 2026 commentscope contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress display for a running extraction.
//!
//! A spinner covers the open-ended phase (waiting for the comments and
//! scrolling them in); once the thread count is known it turns into a bar.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for the loading phase.
pub fn create_spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("\u{25b8}\u{25b9}\u{25b8}\u{25b9}\u{25b8}"),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Switch to a bounded bar once the total is known, then set `current`.
pub fn update(bar: &ProgressBar, current: usize, total: usize) {
    if bar.length() != Some(total as u64) {
        bar.set_length(total as u64);
        bar.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos:>5}/{len} {msg}")
                .unwrap()
                .progress_chars("\u{2588}\u{2589}\u{2591}"),
        );
        bar.set_message("comments");
    }
    bar.set_position(current as u64);
}

/// Finish with a final message.
pub fn finish(bar: &ProgressBar, message: &str) {
    bar.set_style(ProgressStyle::with_template("  {msg}").unwrap());
    bar.finish_with_message(message.to_string());
}
