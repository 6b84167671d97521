//! Lexical sentiment classification and aggregation.

pub mod aggregator;
pub mod lexicon;

pub use aggregator::{analyze, Analysis, AnalyzeError, AnnotatedComment, SentimentSummary};
pub use lexicon::{classify, Sentiment, SentimentCategory};
