//! Per-session deduplication and accumulated results.

use crate::extraction::types::{CommentRecord, NodeKey};
use fnv::FnvHashSet;

/// State owned by one extraction session.
///
/// Passing the same session to repeated extractions makes them
/// incremental: threads already recorded are skipped. A fresh session
/// starts from nothing.
#[derive(Debug)]
pub struct ExtractionSession {
    id: String,
    processed: FnvHashSet<NodeKey>,
    comments: Vec<CommentRecord>,
}

impl ExtractionSession {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            processed: FnvHashSet::default(),
            comments: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_processed(&self, key: &NodeKey) -> bool {
        self.processed.contains(key)
    }

    /// Keep `record` and mark its source thread as done.
    /// Returns `false` if the thread was already recorded.
    pub fn record(&mut self, key: NodeKey, record: CommentRecord) -> bool {
        if !self.processed.insert(key) {
            return false;
        }
        self.comments.push(record);
        true
    }

    pub fn comments(&self) -> &[CommentRecord] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl Default for ExtractionSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_idempotent_per_key() {
        let mut session = ExtractionSession::new();
        let key = NodeKey {
            digest: 42,
            occurrence: 0,
        };
        let record = CommentRecord {
            author: "@a".into(),
            text: "t".into(),
            likes: 0,
            date: "Unknown".into(),
            replies: 0,
        };
        assert!(session.record(key, record.clone()));
        assert!(!session.record(key, record));
        assert!(session.is_processed(&key));
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(ExtractionSession::new().id(), ExtractionSession::new().id());
    }
}
