//! Word-count sentiment scoring.

use fnv::FnvHashSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Scores above this are positive, below its negation negative.
pub const CATEGORY_THRESHOLD: f64 = 10.0;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "awesome", "excellent", "happy", "love", "wonderful", "fantastic",
    "amazing", "beautiful", "best", "perfect", "brilliant", "outstanding", "helpful",
    "impressive", "nice", "thank", "thanks", "positive", "recommend", "recommended",
    "well", "super", "cool", "interesting", "enjoyed", "enjoy", "likes", "like",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "hate", "worst", "poor", "disappointing",
    "disappointed", "waste", "boring", "useless", "stupid", "annoying", "dislike",
    "unfortunately", "negative", "wrong", "difficult", "hard", "problem", "issue",
    "issues", "problems", "fail", "failed", "fails", "failing",
];

static POSITIVE: LazyLock<FnvHashSet<&'static str>> =
    LazyLock::new(|| POSITIVE_WORDS.iter().copied().collect());

static NEGATIVE: LazyLock<FnvHashSet<&'static str>> =
    LazyLock::new(|| NEGATIVE_WORDS.iter().copied().collect());

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

impl SentimentCategory {
    /// Category for a score in `[-100, 100]`. Thresholds are exclusive.
    pub fn from_score(score: f64) -> Self {
        if score > CATEGORY_THRESHOLD {
            SentimentCategory::Positive
        } else if score < -CATEGORY_THRESHOLD {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentCategory::Positive => "positive",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and category for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub category: SentimentCategory,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            category: SentimentCategory::Neutral,
        }
    }
}

/// Anything that can score a piece of text.
pub trait SentimentClassifier {
    fn classify(&self, text: &str) -> Sentiment;
}

/// Counts hits against fixed positive and negative word lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Sentiment {
        classify(text)
    }
}

/// `(positive hits - negative hits) / tokens * 100`, categorized by
/// [`CATEGORY_THRESHOLD`]. Empty text is neutral with score 0.
pub fn classify(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let mut tokens = 0usize;
    let mut positive = 0i64;
    let mut negative = 0i64;

    for word in WORD_RE.find_iter(&lowered).map(|m| m.as_str()) {
        tokens += 1;
        if POSITIVE.contains(word) {
            positive += 1;
        }
        if NEGATIVE.contains(word) {
            negative += 1;
        }
    }

    if tokens == 0 {
        return Sentiment::neutral();
    }

    let score = (positive - negative) as f64 * 100.0 / tokens as f64;
    Sentiment {
        score,
        category: SentimentCategory::from_score(score),
    }
}
