//! Drive one extraction from page check to final event.

use crate::extraction::dom;
use crate::extraction::error::ExtractError;
use crate::extraction::loader::{self, LoadOutcome, LoaderConfig};
use crate::extraction::normalizer::normalize;
use crate::extraction::session::ExtractionSession;
use crate::extraction::types::{CommentNode, ExtractionEvent, NodeKey};
use crate::platform::Platform;
use crate::renderer::{RenderContext, ScrollBlock};
use anyhow::anyhow;
use async_stream::stream;
use futures::Stream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Timing and reporting knobs for an [`Extractor`].
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// How long to wait for the comments container to appear.
    pub container_timeout: Duration,
    /// Interval between checks for the container.
    pub container_poll: Duration,
    /// Pause for the page to render, applied before and after the
    /// initial scroll to the comments.
    pub settle: Duration,
    /// Emit progress on every n-th enumerated thread.
    pub progress_every: usize,
    pub loader: LoaderConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            container_timeout: Duration::from_secs(30),
            container_poll: Duration::from_millis(100),
            settle: Duration::from_secs(2),
            progress_every: 10,
            loader: LoaderConfig::default(),
        }
    }
}

/// Set while any extraction stream in this process is alive.
static IN_FLIGHT: AtomicBool = AtomicBool::new(false);

/// Extracts comments from pages of one platform.
///
/// Only one extraction runs at a time in the process, whichever
/// extractor started it; the slot is held until the event stream
/// finishes or is dropped.
pub struct Extractor {
    platform: Platform,
    config: ExtractorConfig,
}

/// Releases the in-flight slot when dropped.
struct InFlightGuard;

impl InFlightGuard {
    fn acquire() -> Result<Self, ExtractError> {
        IN_FLIGHT
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ExtractError::AlreadyRunning)?;
        Ok(InFlightGuard)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        IN_FLIGHT.store(false, Ordering::SeqCst);
    }
}

/// Serializes tests that start extractions, since the slot is global.
#[cfg(test)]
static TEST_SERIAL: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

impl Extractor {
    pub fn new(platform: Platform, config: ExtractorConfig) -> Self {
        Self { platform, config }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Whether any extraction is in flight in this process.
    pub fn is_running(&self) -> bool {
        IN_FLIGHT.load(Ordering::SeqCst)
    }

    /// Start extracting from `context` into `session`.
    ///
    /// The returned stream yields progress events followed by exactly one
    /// `Complete` (carrying every record the session holds) or `Error`.
    /// Nothing happens until the stream is polled. Fails with
    /// [`ExtractError::AlreadyRunning`] while another stream is alive.
    pub fn extract<'a>(
        &'a self,
        context: &'a dyn RenderContext,
        session: &'a mut ExtractionSession,
    ) -> Result<impl Stream<Item = ExtractionEvent> + 'a, ExtractError> {
        let guard = InFlightGuard::acquire()?;
        let every = self.config.progress_every.max(1);

        Ok(stream! {
            let _guard = guard;
            info!(session = session.id(), platform = %self.platform, "extraction started");

            let nodes = match self.collect_nodes(context).await {
                Ok(nodes) => nodes,
                Err(e) => {
                    yield failure(e);
                    return;
                }
            };

            let total = nodes.len();
            let before = session.len();
            for (index, (key, node)) in nodes.iter().enumerate() {
                if session.is_processed(key) {
                    continue;
                }
                match normalize(node) {
                    Some(record) => {
                        session.record(*key, record);
                    }
                    None => debug!(index, "skipping thread without author or body"),
                }
                if index % every == 0 {
                    yield ExtractionEvent::Progress { current: index + 1, total };
                }
            }

            if session.is_empty() {
                yield failure(ExtractError::NoCommentsParsed { candidates: total });
                return;
            }

            info!(
                session = session.id(),
                added = session.len() - before,
                total = session.len(),
                "extraction complete"
            );
            yield ExtractionEvent::Complete { comments: session.comments().to_vec() };
        })
    }

    /// Everything up to and including enumeration of the rendered threads.
    async fn collect_nodes(
        &self,
        context: &dyn RenderContext,
    ) -> Result<Vec<(NodeKey, CommentNode)>, ExtractError> {
        let url = context.get_url().await?;
        if !self.platform.is_content_page(&url) {
            return Err(ExtractError::NotAVideoPage { url });
        }

        let selectors = self.platform.selectors();
        self.wait_for_container(context, selectors.container).await?;

        tokio::time::sleep(self.config.settle).await;
        context
            .scroll_into_view(selectors.container, ScrollBlock::Start)
            .await?;
        tokio::time::sleep(self.config.settle).await;

        match loader::load_all(context, selectors.container, &self.config.loader).await? {
            LoadOutcome::TimedOut { ticks, .. } => {
                info!(ticks, "continuing with the comments loaded so far")
            }
            outcome => debug!(?outcome, "loading finished"),
        }

        let html = context.content().await?;
        let nodes = tokio::task::spawn_blocking(move || dom::scan_comments(&html, selectors))
            .await
            .map_err(|e| anyhow!("snapshot scan failed: {e}"))?;

        if nodes.is_empty() {
            return Err(ExtractError::NoCommentsFound);
        }
        info!("found {} comments to process", nodes.len());
        Ok(nodes)
    }

    async fn wait_for_container(
        &self,
        context: &dyn RenderContext,
        selector: &str,
    ) -> Result<(), ExtractError> {
        let started = Instant::now();
        loop {
            if context.element_exists(selector).await? {
                return Ok(());
            }
            if started.elapsed() >= self.config.container_timeout {
                return Err(ExtractError::ContainerNotFound {
                    selector: selector.to_string(),
                    timeout_ms: self.config.container_timeout.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.config.container_poll).await;
        }
    }
}

fn failure(e: ExtractError) -> ExtractionEvent {
    error!("extraction failed: {e}");
    ExtractionEvent::Error {
        message: e.to_string(),
    }
}
