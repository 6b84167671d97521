//! Shared CLI output formatting with colors, symbols, and structured display.

use crate::sentiment::SentimentSummary;
use std::io::IsTerminal;

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("COMMENTSCOPE_NO_COLOR").is_ok() {
        return false;
    }
    std::io::stderr().is_terminal()
}

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

/// Simple percentage bar, e.g. `[█████░░░░░]`.
pub fn share_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}]",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width - filled)
    )
}

/// Print the sentiment breakdown.
pub fn print_summary(s: &Styled, summary: &SentimentSummary) {
    let rows = [
        ("Positive", summary.positive_count, summary.percentage_positive),
        ("Neutral", summary.neutral_count, summary.percentage_neutral),
        ("Negative", summary.negative_count, summary.percentage_negative),
    ];

    eprintln!("  {}", s.bold(&format!("Sentiment of {} comments", summary.total_count)));
    for (label, count, pct) in rows {
        let bar = share_bar(pct, 20);
        let bar = match label {
            "Positive" => s.green(&bar),
            "Negative" => s.red(&bar),
            _ => s.yellow(&bar),
        };
        eprintln!("    {label:<10} {bar} {count:>6} ({pct:.1}%)");
    }
    eprintln!(
        "    {:<10} {}",
        "Average",
        s.bold(&format!("{:.1}", summary.average_score))
    );
}

/// Check if --quiet mode is active.
pub fn is_quiet() -> bool {
    std::env::var("COMMENTSCOPE_QUIET").is_ok()
}

/// Check if --json mode is active.
pub fn is_json() -> bool {
    std::env::var("COMMENTSCOPE_JSON").is_ok()
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_bar() {
        assert_eq!(share_bar(0.0, 4), "[\u{2591}\u{2591}\u{2591}\u{2591}]");
        assert_eq!(share_bar(50.0, 4), "[\u{2588}\u{2588}\u{2591}\u{2591}]");
        assert_eq!(share_bar(100.0, 4), "[\u{2588}\u{2588}\u{2588}\u{2588}]");
        assert_eq!(share_bar(250.0, 2), "[\u{2588}\u{2588}]");
    }
}
