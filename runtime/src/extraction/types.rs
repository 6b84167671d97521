//! Records and events produced by extraction.

use serde::{Deserialize, Serialize};

/// One normalized comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub author: String,
    pub text: String,
    pub likes: u64,
    /// Relative date as displayed, or `"Unknown"`.
    pub date: String,
    pub replies: u64,
}

/// Identity of a comment thread within one extraction session.
///
/// Keyed on content, not position: a thread inserted above others
/// (a pinned comment, the viewer's own post) must not shift their keys.
/// `occurrence` tells apart threads with identical author and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub digest: u64,
    pub occurrence: usize,
}

/// A comment thread lifted out of a DOM snapshot, before normalization.
///
/// Every accessor is optional: the live DOM is only partially
/// structured and any sub-element may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentNode {
    pub author: Option<String>,
    pub body: Option<String>,
    pub likes: Option<String>,
    pub date: Option<String>,
    /// Replies found in the nested container; `None` when it is absent.
    pub reply_count: Option<usize>,
}

/// Lifecycle of one extraction: any number of `Progress`, then exactly
/// one `Complete` or `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ExtractionEvent {
    Progress { current: usize, total: usize },
    Complete { comments: Vec<CommentRecord> },
    Error { message: String },
}

impl ExtractionEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ExtractionEvent::Progress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_event_wire_shapes() {
        let progress = ExtractionEvent::Progress {
            current: 11,
            total: 12,
        };
        assert_json_eq!(
            serde_json::to_value(&progress).unwrap(),
            json!({ "event": "progress", "current": 11, "total": 12 })
        );

        let complete = ExtractionEvent::Complete {
            comments: vec![CommentRecord {
                author: "@ana".into(),
                text: "nice".into(),
                likes: 1200,
                date: "2 days ago".into(),
                replies: 0,
            }],
        };
        assert_json_eq!(
            serde_json::to_value(&complete).unwrap(),
            json!({
                "event": "complete",
                "comments": [{
                    "author": "@ana",
                    "text": "nice",
                    "likes": 1200,
                    "date": "2 days ago",
                    "replies": 0
                }]
            })
        );

        let error = ExtractionEvent::Error {
            message: "boom".into(),
        };
        assert_json_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({ "event": "error", "message": "boom" })
        );
        assert!(error.is_terminal());
        assert!(!progress.is_terminal());
    }
}
