//! CSV export of analyzed comments.

use crate::platform::Platform;
use crate::sentiment::AnnotatedComment;
use anyhow::{Context, Result};
use std::path::Path;

pub const CSV_HEADERS: [&str; 7] = [
    "Author",
    "Comment",
    "Likes",
    "Date",
    "Replies",
    "Sentiment",
    "Sentiment Score",
];

/// `<platform>_comments_analysis.csv`
pub fn default_file_name(platform: Platform) -> String {
    format!("{}_comments_analysis.csv", platform.name())
}

/// Quote a field, doubling any quotes inside it.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// One row: the comment text is always quoted, the score has two decimals.
pub fn csv_row(comment: &AnnotatedComment) -> String {
    let c = &comment.comment;
    [
        c.author.clone(),
        quote(&c.text),
        c.likes.to_string(),
        c.date.clone(),
        c.replies.to_string(),
        comment.sentiment_category.to_string(),
        format!("{:.2}", comment.sentiment_score),
    ]
    .join(",")
}

/// Header plus one row per comment, newline separated.
pub fn to_csv(comments: &[AnnotatedComment]) -> String {
    std::iter::once(CSV_HEADERS.join(","))
        .chain(comments.iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the CSV to `path`, creating parent directories.
pub fn write_csv(path: &Path, comments: &[AnnotatedComment]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, to_csv(comments))
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::CommentRecord;
    use crate::sentiment::analyze;

    fn analyzed(text: &str) -> Vec<AnnotatedComment> {
        analyze(&[CommentRecord {
            author: "@ana".into(),
            text: text.into(),
            likes: 1200,
            date: "2 weeks ago".into(),
            replies: 3,
        }])
        .unwrap()
        .comments
    }

    #[test]
    fn test_row_layout() {
        let rows = analyzed(r#"she said "great" twice"#);
        assert_eq!(
            csv_row(&rows[0]),
            r#"@ana,"she said ""great"" twice",1200,2 weeks ago,3,positive,25.00"#
        );
    }

    #[test]
    fn test_csv_starts_with_header() {
        let csv = to_csv(&analyzed("fine"));
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Author,Comment,Likes,Date,Replies,Sentiment,Sentiment Score")
        );
        assert_eq!(lines.next(), Some(r#"@ana,"fine",1200,2 weeks ago,3,neutral,0.00"#));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_csv_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested").join(default_file_name(Platform::Youtube));
        write_csv(&path, &analyzed("awful")).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("negative,-100.00"));
        assert!(path.ends_with("youtube_comments_analysis.csv"));
    }
}
