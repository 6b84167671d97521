//! Supported platforms, their page checks, and the start command.
//!
//! Each platform knows which URLs host comments and where in the
//! rendered DOM those comments live. Update the selectors here when
//! the site changes its markup.

use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// A site comments can be extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
}

/// Rejections raised before any extraction starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("please navigate to a {platform} video page (got {url})")]
    InvalidUrl { platform: Platform, url: String },
}

/// Where comment data lives in a platform's DOM.
pub struct CommentSelectors {
    /// Element wrapping the whole comments section.
    pub container: &'static str,
    /// One top-level comment thread.
    pub thread: &'static Selector,
    /// The thread's own comment, as opposed to its replies.
    pub comment: &'static Selector,
    pub author: &'static Selector,
    pub body: &'static Selector,
    pub likes: &'static Selector,
    pub date: &'static Selector,
    /// Nested container holding replies, and a reply within it.
    pub replies: &'static Selector,
    pub reply: &'static Selector,
    /// `id` of the replies container, used to skip nested threads.
    pub replies_id: &'static str,
}

mod youtube {
    use super::*;

    fn sel(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    pub static THREAD: LazyLock<Selector> = LazyLock::new(|| sel("ytd-comment-thread-renderer"));
    pub static COMMENT: LazyLock<Selector> = LazyLock::new(|| sel("#comment"));
    pub static AUTHOR: LazyLock<Selector> = LazyLock::new(|| sel("#author-text span"));
    pub static BODY: LazyLock<Selector> = LazyLock::new(|| sel("#content-text"));
    pub static LIKES: LazyLock<Selector> = LazyLock::new(|| sel("#vote-count-middle"));
    pub static DATE: LazyLock<Selector> = LazyLock::new(|| {
        sel("#header-author .published-time-text, #header-author yt-formatted-string.published-time-text")
    });
    pub static REPLIES: LazyLock<Selector> = LazyLock::new(|| sel("#replies"));
    pub static REPLY: LazyLock<Selector> = LazyLock::new(|| sel("ytd-comment-renderer"));

    pub static SELECTORS: LazyLock<CommentSelectors> = LazyLock::new(|| CommentSelectors {
        container: "ytd-comments",
        thread: &THREAD,
        comment: &COMMENT,
        author: &AUTHOR,
        body: &BODY,
        likes: &LIKES,
        date: &DATE,
        replies: &REPLIES,
        reply: &REPLY,
        replies_id: "replies",
    });
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
        }
    }

    pub fn selectors(self) -> &'static CommentSelectors {
        match self {
            Platform::Youtube => &youtube::SELECTORS,
        }
    }

    /// Check a URL before launching anything.
    pub fn validate_url(self, url: &str) -> Result<(), CommandError> {
        let ok = match self {
            Platform::Youtube => url.contains("youtube.com/watch?v="),
        };
        if ok {
            Ok(())
        } else {
            Err(CommandError::InvalidUrl {
                platform: self,
                url: url.to_string(),
            })
        }
    }

    /// Whether the page currently loaded hosts comments.
    pub fn is_content_page(self, url: &str) -> bool {
        let path = url::Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| url.to_string());
        match self {
            Platform::Youtube => path.contains("/watch"),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            _ => Err(CommandError::UnsupportedPlatform(s.to_string())),
        }
    }
}

/// The trigger message: `{ "action": "start", "platform": "youtube" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    pub action: String,
    pub platform: String,
}

impl Command {
    pub const START: &'static str = "start";

    pub fn start(platform: Platform) -> Self {
        Self {
            action: Self::START.to_string(),
            platform: platform.name().to_string(),
        }
    }

    /// Validate the command, returning the platform it targets.
    pub fn validate(&self) -> Result<Platform, CommandError> {
        if self.action != Self::START {
            return Err(CommandError::UnknownAction(self.action.clone()));
        }
        self.platform.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(Platform::Youtube
            .validate_url("https://www.youtube.com/watch?v=abc123")
            .is_ok());
        let err = Platform::Youtube
            .validate_url("https://www.youtube.com/feed/trending")
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidUrl { .. }));
    }

    #[test]
    fn test_content_page_checks_path() {
        assert!(Platform::Youtube.is_content_page("https://www.youtube.com/watch?v=x"));
        assert!(!Platform::Youtube.is_content_page("https://www.youtube.com/results?q=watch"));
    }

    #[test]
    fn test_command_validation() {
        let cmd: Command =
            serde_json::from_str(r#"{"action":"start","platform":"youtube"}"#).unwrap();
        assert_eq!(cmd.validate(), Ok(Platform::Youtube));

        let cmd = Command {
            action: "start".into(),
            platform: "tiktok".into(),
        };
        assert_eq!(
            cmd.validate(),
            Err(CommandError::UnsupportedPlatform("tiktok".into()))
        );

        let cmd = Command {
            action: "stop".into(),
            platform: "youtube".into(),
        };
        assert!(matches!(cmd.validate(), Err(CommandError::UnknownAction(_))));
    }

    #[test]
    fn test_selectors_parse() {
        let s = Platform::Youtube.selectors();
        assert_eq!(s.container, "ytd-comments");
        assert_eq!(s.replies_id, "replies");
    }
}
