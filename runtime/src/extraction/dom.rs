//! Enumerate comment threads in a DOM snapshot (sync, uses scraper).

use crate::extraction::types::{CommentNode, NodeKey};
use crate::platform::CommentSelectors;
use fnv::{FnvHashMap, FnvHasher};
use scraper::{ElementRef, Html, Selector};
use std::hash::{Hash, Hasher};

/// Every top-level comment thread in `html`, in document order.
///
/// Threads nested inside another thread's replies container are not
/// candidates of their own; they only count toward the parent's replies.
pub fn scan_comments(html: &str, selectors: &CommentSelectors) -> Vec<(NodeKey, CommentNode)> {
    let document = Html::parse_document(html);
    let mut seen: FnvHashMap<u64, usize> = FnvHashMap::default();

    document
        .select(selectors.thread)
        .filter(|thread| !inside_replies(thread, selectors.replies_id))
        .filter_map(|thread| read_thread(thread, selectors))
        .map(|node| {
            let digest = digest(&node);
            let count = seen.entry(digest).or_default();
            let key = NodeKey {
                digest,
                occurrence: *count,
            };
            *count += 1;
            (key, node)
        })
        .collect()
}

fn inside_replies(element: &ElementRef<'_>, replies_id: &str) -> bool {
    element.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .and_then(|e| e.id())
            .is_some_and(|id| id == replies_id)
    })
}

/// Read each accessor independently; a missing one never hides the others.
/// A thread without its own comment element is not a candidate.
fn read_thread(thread: ElementRef<'_>, selectors: &CommentSelectors) -> Option<CommentNode> {
    let comment = thread
        .select(selectors.comment)
        .find(|c| !inside_replies(c, selectors.replies_id))?;

    Some(CommentNode {
        author: first_text(comment, selectors.author),
        body: first_text(comment, selectors.body),
        likes: first_text(comment, selectors.likes),
        date: first_text(comment, selectors.date),
        reply_count: thread
            .select(selectors.replies)
            .next()
            .map(|replies| replies.select(selectors.reply).count()),
    })
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn digest(node: &CommentNode) -> u64 {
    let mut hasher = FnvHasher::default();
    node.author.hash(&mut hasher);
    node.body.hash(&mut hasher);
    hasher.finish()
}
