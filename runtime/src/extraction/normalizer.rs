//! Turn a raw comment node into a [`CommentRecord`].

use crate::extraction::types::{CommentNode, CommentRecord};
use tracing::warn;

/// Date shown when the node carries none.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Normalize one node. `None` means "not a comment": author or body is
/// missing, and the caller should skip the node.
pub fn normalize(node: &CommentNode) -> Option<CommentRecord> {
    let author = node.author.as_ref()?;
    let text = node.body.as_ref()?;

    let likes = match node.likes.as_deref() {
        Some(raw) => parse_count(raw).unwrap_or_else(|| {
            warn!(raw, author = author.as_str(), "unreadable like count, using 0");
            0
        }),
        None => 0,
    };

    Some(CommentRecord {
        author: author.clone(),
        text: text.clone(),
        likes,
        date: node
            .date
            .clone()
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        replies: node.reply_count.unwrap_or(0) as u64,
    })
}

/// Parse an abbreviated count: `"1.2K"` → 1200, `"3M"` → 3 000 000,
/// `"45"` → 45. Empty text counts as zero. `None` when unreadable.
pub fn parse_count(raw: &str) -> Option<u64> {
    let text = raw.trim();
    if text.is_empty() {
        return Some(0);
    }

    let (number, multiplier) = if let Some(prefix) = text.strip_suffix('K') {
        (prefix, 1_000.0)
    } else if let Some(prefix) = text.strip_suffix('M') {
        (prefix, 1_000_000.0)
    } else {
        return text.parse::<u64>().ok();
    };

    let value: f64 = number.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // Round away float noise before truncating, so 1.2 * 1000 is 1200.
    Some(((value * multiplier * 1e6).round() / 1e6).trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(author: Option<&str>, body: Option<&str>) -> CommentNode {
        CommentNode {
            author: author.map(String::from),
            body: body.map(String::from),
            likes: Some("12".into()),
            date: Some("1 week ago".into()),
            reply_count: Some(4),
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1.2K"), Some(1200));
        assert_eq!(parse_count("3M"), Some(3_000_000));
        assert_eq!(parse_count("45"), Some(45));
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count("K"), None);
        assert_eq!(parse_count("2.55K"), Some(2550));
    }

    #[test]
    fn test_normalize_full_node() {
        let record = normalize(&node(Some("@ana"), Some("hello"))).unwrap();
        assert_eq!(
            record,
            CommentRecord {
                author: "@ana".into(),
                text: "hello".into(),
                likes: 12,
                date: "1 week ago".into(),
                replies: 4,
            }
        );
    }

    #[test]
    fn test_missing_author_or_body_is_skipped() {
        assert_eq!(normalize(&node(None, Some("hello"))), None);
        assert_eq!(normalize(&node(Some("@ana"), None)), None);
        assert_eq!(normalize(&node(None, None)), None);
    }

    #[test]
    fn test_optional_fields_default() {
        let bare = CommentNode {
            author: Some("@bo".into()),
            body: Some("".into()),
            likes: Some("lots".into()),
            ..Default::default()
        };
        let record = normalize(&bare).unwrap();
        assert_eq!(record.likes, 0);
        assert_eq!(record.date, UNKNOWN_DATE);
        assert_eq!(record.replies, 0);
    }
}
