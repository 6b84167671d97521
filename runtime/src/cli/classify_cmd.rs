//! `commentscope classify <text>`: score one piece of text.

use crate::cli::output::{self, Styled};
use crate::sentiment::{classify, SentimentCategory};
use anyhow::Result;

/// Run the classify command.
pub fn run(text: &str) -> Result<()> {
    let sentiment = classify(text);

    if output::is_json() {
        output::print_json(&serde_json::to_value(sentiment)?);
        return Ok(());
    }

    let s = Styled::new();
    let label = match sentiment.category {
        SentimentCategory::Positive => s.green("positive"),
        SentimentCategory::Negative => s.red("negative"),
        SentimentCategory::Neutral => s.yellow("neutral"),
    };
    println!("{label} {}", s.dim(&format!("({:.2})", sentiment.score)));
    Ok(())
}
