//! Scripted page used by loader and extraction tests.

use crate::renderer::{RenderContext, ScrollBlock};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A fake page whose container appears after a number of polls and whose
/// height follows a script. The last scripted height repeats forever.
pub struct ScriptedPage {
    url: String,
    html: String,
    container: Option<String>,
    appears_after: usize,
    heights: Mutex<VecDeque<u64>>,
    state: Mutex<ScriptState>,
}

#[derive(Default)]
struct ScriptState {
    exists_polls: usize,
    scrolls: Vec<ScrollBlock>,
    height_reads: usize,
    last_height: u64,
}

impl ScriptedPage {
    pub fn new(url: &str, container: &str, html: String) -> Self {
        Self {
            url: url.to_string(),
            html,
            container: Some(container.to_string()),
            appears_after: 0,
            heights: Mutex::new(VecDeque::new()),
            state: Mutex::new(ScriptState::default()),
        }
    }

    /// A page with no comments container at all.
    pub fn without_container(url: &str) -> Self {
        Self {
            container: None,
            ..Self::new(url, "", String::new())
        }
    }

    /// Report the container as missing for the first `polls` checks.
    pub fn appearing_after(mut self, polls: usize) -> Self {
        self.appears_after = polls;
        self
    }

    pub fn with_heights(self, heights: &[u64]) -> Self {
        *self.heights.lock().unwrap() = heights.iter().copied().collect();
        self
    }

    pub fn scrolls(&self) -> Vec<ScrollBlock> {
        self.state.lock().unwrap().scrolls.clone()
    }

    pub fn height_reads(&self) -> usize {
        self.state.lock().unwrap().height_reads
    }

    fn matches(&self, selector: &str) -> bool {
        self.container.as_deref() == Some(selector)
    }
}

#[async_trait]
impl RenderContext for ScriptedPage {
    async fn navigate(&self, _url: &str, _timeout_ms: u64) -> Result<()> {
        Ok(())
    }

    async fn get_url(&self) -> Result<String> {
        Ok(self.url.clone())
    }

    async fn execute_js(&self, _script: &str) -> Result<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }

    async fn content(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    async fn element_exists(&self, selector: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.exists_polls += 1;
        Ok(self.matches(selector) && state.exists_polls > self.appears_after)
    }

    async fn scroll_into_view(&self, selector: &str, block: ScrollBlock) -> Result<bool> {
        if !self.matches(selector) {
            return Ok(false);
        }
        self.state.lock().unwrap().scrolls.push(block);
        Ok(true)
    }

    async fn scroll_height(&self, selector: &str) -> Result<Option<u64>> {
        if !self.matches(selector) {
            return Ok(None);
        }
        let mut state = self.state.lock().unwrap();
        state.height_reads += 1;
        if let Some(next) = self.heights.lock().unwrap().pop_front() {
            state.last_height = next;
        }
        Ok(Some(state.last_height))
    }
}
