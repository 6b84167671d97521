//! Scroll a lazily-loaded container until it stops growing.

use crate::renderer::{RenderContext, ScrollBlock};
use anyhow::Result;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Polling parameters for [`load_all`].
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delay between scroll ticks.
    pub tick: Duration,
    /// Consecutive ticks without growth that count as converged.
    pub max_no_change: u32,
    /// Hard bound on the whole loading session.
    pub max_duration: Option<Duration>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(1000),
            max_no_change: 3,
            max_duration: Some(Duration::from_secs(120)),
        }
    }
}

/// How a loading session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The container was not on the page.
    ContainerAbsent,
    /// Height stopped changing.
    Converged { ticks: u32, height: u64 },
    /// `max_duration` elapsed first; whatever loaded is kept.
    TimedOut { ticks: u32, height: u64 },
}

/// Height tracking for one loading session.
#[derive(Debug, Default)]
struct LoaderState {
    previous_height: u64,
    no_growth_streak: u32,
}

impl LoaderState {
    /// Record a height reading. Returns `true` once converged.
    fn observe(&mut self, height: u64, max_no_change: u32) -> bool {
        if height == self.previous_height {
            self.no_growth_streak += 1;
            self.no_growth_streak >= max_no_change
        } else {
            self.no_growth_streak = 0;
            self.previous_height = height;
            false
        }
    }
}

/// Keep scrolling `container` to its end until its height holds steady
/// for `max_no_change` ticks.
pub async fn load_all(
    context: &dyn RenderContext,
    container: &str,
    config: &LoaderConfig,
) -> Result<LoadOutcome> {
    if !context.element_exists(container).await? {
        debug!("{container} not present, nothing to load");
        return Ok(LoadOutcome::ContainerAbsent);
    }

    let deadline = config.max_duration.map(|d| Instant::now() + d);
    let mut state = LoaderState::default();
    let mut ticks = 0u32;

    loop {
        tokio::time::sleep(config.tick).await;
        ticks += 1;

        if !context.scroll_into_view(container, ScrollBlock::End).await? {
            warn!("{container} disappeared while loading");
            return Ok(LoadOutcome::ContainerAbsent);
        }
        let height = context.scroll_height(container).await?.unwrap_or(0);
        debug!(ticks, height, streak = state.no_growth_streak, "loader tick");

        if state.observe(height, config.max_no_change) {
            info!(ticks, height, "comments stopped loading");
            return Ok(LoadOutcome::Converged { ticks, height });
        }

        if deadline.is_some_and(|d| Instant::now() >= d) {
            warn!(ticks, height, "loading bound reached before height settled");
            return Ok(LoadOutcome::TimedOut { ticks, height });
        }
    }
}
