//! Live page access.
//!
//! Extraction never touches a browser directly. It talks to a
//! [`RenderContext`], which the Chromium driver implements over CDP and
//! which tests replace with scripted pages.

pub mod chromium;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use async_trait::async_trait;

/// Where an element should land in the viewport after scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    End,
}

impl ScrollBlock {
    fn as_js(self) -> &'static str {
        match self {
            ScrollBlock::Start => "start",
            ScrollBlock::End => "end",
        }
    }
}

/// A rendered page the extractor can inspect and scroll.
///
/// Only `navigate`, `get_url`, `execute_js`, `content` and `close` are
/// required; the element helpers are built on `execute_js`.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to `url`, waiting at most `timeout_ms`.
    async fn navigate(&self, url: &str, timeout_ms: u64) -> Result<()>;

    /// The URL currently loaded.
    async fn get_url(&self) -> Result<String>;

    /// Evaluate a JavaScript expression and return its JSON value.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;

    /// Serialized HTML of the whole document as currently rendered.
    async fn content(&self) -> Result<String>;

    /// Release the page.
    async fn close(&self) -> Result<()>;

    /// Whether an element matching `selector` is in the document.
    async fn element_exists(&self, selector: &str) -> Result<bool> {
        let script = format!(
            "document.querySelector({}) !== null",
            serde_json::to_string(selector)?
        );
        Ok(self.execute_js(&script).await?.as_bool().unwrap_or(false))
    }

    /// Scroll the first element matching `selector` into view.
    /// Returns `false` when no such element exists.
    async fn scroll_into_view(&self, selector: &str, block: ScrollBlock) -> Result<bool> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return false;
                el.scrollIntoView({{ behavior: 'smooth', block: '{}' }});
                return true;
            }})()"#,
            serde_json::to_string(selector)?,
            block.as_js()
        );
        Ok(self.execute_js(&script).await?.as_bool().unwrap_or(false))
    }

    /// Scroll height of the first element matching `selector`, if present.
    async fn scroll_height(&self, selector: &str) -> Result<Option<u64>> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({});
                return el ? el.scrollHeight : null;
            }})()"#,
            serde_json::to_string(selector)?
        );
        Ok(self.execute_js(&script).await?.as_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every script and answers with a fixed value.
    struct EchoPage {
        answer: serde_json::Value,
        scripts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RenderContext for EchoPage {
        async fn navigate(&self, _url: &str, _timeout_ms: u64) -> Result<()> {
            Ok(())
        }
        async fn get_url(&self) -> Result<String> {
            Ok(String::new())
        }
        async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
            self.scripts.lock().unwrap().push(script.to_string());
            Ok(self.answer.clone())
        }
        async fn content(&self) -> Result<String> {
            Ok(String::new())
        }
        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    fn echo(answer: serde_json::Value) -> EchoPage {
        EchoPage {
            answer,
            scripts: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_selector_is_json_quoted() {
        let page = echo(serde_json::json!(true));
        let found = tokio_test::block_on(page.element_exists(r#"a[title="it's"]"#)).unwrap();
        assert!(found);
        let scripts = page.scripts.lock().unwrap();
        assert!(scripts[0].contains(r#""a[title=\"it's\"]""#));
    }

    #[test]
    fn test_scroll_helpers() {
        let page = echo(serde_json::json!(1840));
        let height = tokio_test::block_on(page.scroll_height("ytd-comments")).unwrap();
        assert_eq!(height, Some(1840));

        let page = echo(serde_json::Value::Null);
        assert_eq!(
            tokio_test::block_on(page.scroll_height("ytd-comments")).unwrap(),
            None
        );
        let scrolled =
            tokio_test::block_on(page.scroll_into_view("ytd-comments", ScrollBlock::End)).unwrap();
        assert!(!scrolled);
        assert!(page.scripts.lock().unwrap()[1].contains("block: 'end'"));
    }
}
