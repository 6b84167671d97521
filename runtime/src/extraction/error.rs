use thiserror::Error;

/// Terminal failures of an extraction attempt.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a video page: {url}")]
    NotAVideoPage { url: String },

    #[error("comments section not found: no `{selector}` after {timeout_ms}ms")]
    ContainerNotFound { selector: String, timeout_ms: u64 },

    #[error("no comments found, try refreshing the page")]
    NoCommentsFound,

    #[error("failed to parse any of {candidates} comments, refresh and try again")]
    NoCommentsParsed { candidates: usize },

    #[error("extraction already running")]
    AlreadyRunning,

    #[error("page error: {0:#}")]
    Page(#[from] anyhow::Error),
}
