//! Corpus-level sentiment over extracted comments.

use crate::extraction::types::CommentRecord;
use crate::sentiment::lexicon::{LexiconClassifier, SentimentCategory, SentimentClassifier};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("no comments to analyze")]
    EmptyInput,
}

/// A comment with its sentiment attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedComment {
    #[serde(flatten)]
    pub comment: CommentRecord,
    pub sentiment_category: SentimentCategory,
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub total_count: usize,
    pub average_score: f64,
    /// Shares of `total_count`, 0–100, one decimal.
    pub percentage_positive: f64,
    pub percentage_negative: f64,
    pub percentage_neutral: f64,
}

/// Per-comment annotations, in input order, plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub comments: Vec<AnnotatedComment>,
    pub summary: SentimentSummary,
}

/// Analyze with the built-in lexicon.
pub fn analyze(records: &[CommentRecord]) -> Result<Analysis, AnalyzeError> {
    analyze_with(&LexiconClassifier, records)
}

pub fn analyze_with<C>(classifier: &C, records: &[CommentRecord]) -> Result<Analysis, AnalyzeError>
where
    C: SentimentClassifier + ?Sized,
{
    if records.is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }

    let (mut positive, mut negative, mut neutral) = (0usize, 0usize, 0usize);
    let mut total_score = 0.0;

    let comments: Vec<AnnotatedComment> = records
        .iter()
        .map(|record| {
            let sentiment = classifier.classify(&record.text);
            match sentiment.category {
                SentimentCategory::Positive => positive += 1,
                SentimentCategory::Negative => negative += 1,
                SentimentCategory::Neutral => neutral += 1,
            }
            total_score += sentiment.score;
            AnnotatedComment {
                comment: record.clone(),
                sentiment_category: sentiment.category,
                sentiment_score: sentiment.score,
            }
        })
        .collect();

    let total = records.len();
    Ok(Analysis {
        comments,
        summary: SentimentSummary {
            positive_count: positive,
            negative_count: negative,
            neutral_count: neutral,
            total_count: total,
            average_score: total_score / total as f64,
            percentage_positive: percentage(positive, total),
            percentage_negative: percentage(negative, total),
            percentage_neutral: percentage(neutral, total),
        },
    })
}

fn percentage(count: usize, total: usize) -> f64 {
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::lexicon::Sentiment;

    fn record(text: &str) -> CommentRecord {
        CommentRecord {
            author: "@someone".into(),
            text: text.into(),
            likes: 0,
            date: "Unknown".into(),
            replies: 0,
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(analyze(&[]), Err(AnalyzeError::EmptyInput));
    }

    #[test]
    fn test_one_of_each() {
        let records = [
            record("this is great and awesome"),
            record("terrible and awful waste"),
            record("the video starts now"),
        ];
        let analysis = analyze(&records).unwrap();
        let s = &analysis.summary;

        assert_eq!((s.positive_count, s.negative_count, s.neutral_count), (1, 1, 1));
        assert_eq!(s.total_count, 3);
        assert!((-100.0..=100.0).contains(&s.average_score));
        assert!((s.average_score - (40.0 - 75.0) / 3.0).abs() < 1e-9);
        assert_eq!(s.percentage_positive, 33.3);
        assert_eq!(s.percentage_negative, 33.3);
        assert_eq!(s.percentage_neutral, 33.3);

        let categories: Vec<_> = analysis
            .comments
            .iter()
            .map(|c| c.sentiment_category)
            .collect();
        assert_eq!(
            categories,
            [
                SentimentCategory::Positive,
                SentimentCategory::Negative,
                SentimentCategory::Neutral
            ]
        );
        assert_eq!(analysis.comments[1].comment, records[1]);
    }

    #[test]
    fn test_counts_and_percentages_add_up() {
        let texts = [
            "love it", "great great", "bad", "meh", "ok then", "awful waste of time",
            "thanks", "hmm", "", "nice nice nice",
        ];
        for n in 1..=texts.len() {
            let records: Vec<_> = texts[..n].iter().map(|t| record(t)).collect();
            let s = analyze(&records).unwrap().summary;
            assert_eq!(s.positive_count + s.negative_count + s.neutral_count, n);
            assert_eq!(s.total_count, n);
            let sum = s.percentage_positive + s.percentage_negative + s.percentage_neutral;
            assert!((sum - 100.0).abs() <= 0.1 + 1e-9, "n={n}: {sum}");
        }
    }

    struct AlwaysNegative;

    impl SentimentClassifier for AlwaysNegative {
        fn classify(&self, _text: &str) -> Sentiment {
            Sentiment {
                score: -50.0,
                category: SentimentCategory::Negative,
            }
        }
    }

    #[test]
    fn test_custom_classifier() {
        let s = analyze_with(&AlwaysNegative, &[record("great"), record("love")])
            .unwrap()
            .summary;
        assert_eq!(s.negative_count, 2);
        assert_eq!(s.percentage_negative, 100.0);
        assert_eq!(s.average_score, -50.0);
    }
}
