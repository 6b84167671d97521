//! `commentscope scrape <url>`: extract comments from a live video page.

use crate::audit::RunLog;
use crate::cli::analyze_cmd;
use crate::cli::output::{self, Styled};
use crate::cli::progress;
use crate::config;
use crate::extraction::{
    CommentRecord, ExtractionEvent, ExtractionSession, Extractor, ExtractorConfig,
};
use crate::platform::Platform;
use crate::renderer::chromium::{BrowserOptions, ChromiumRenderer};
use crate::renderer::RenderContext;
use anyhow::{bail, Context, Result};
use futures::Stream;
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio_stream::StreamExt;
use tracing::{info, warn};

/// Options for one scrape.
#[derive(Debug, Clone)]
pub struct ScrapeArgs {
    pub url: String,
    pub platform: Platform,
    /// CSV destination; defaults to `<platform>_comments_analysis.csv`.
    pub out: Option<PathBuf>,
    /// Where to save the raw comments as JSON.
    pub save: Option<PathBuf>,
    pub headed: bool,
    pub analyze: bool,
    pub navigation_timeout_ms: u64,
    pub extractor: ExtractorConfig,
}

impl ScrapeArgs {
    pub fn new(url: &str, platform: Platform) -> Self {
        Self {
            url: url.to_string(),
            platform,
            out: None,
            save: None,
            headed: false,
            analyze: true,
            navigation_timeout_ms: 30_000,
            extractor: ExtractorConfig::default(),
        }
    }
}

/// Run the scrape command.
pub async fn run(args: ScrapeArgs) -> Result<()> {
    let s = Styled::new();
    let start = Instant::now();
    args.platform.validate_url(&args.url)?;

    if !output::is_quiet() && !output::is_json() {
        eprintln!("  Starting to scrape {} comments...", args.platform);
    }

    let renderer = ChromiumRenderer::launch(&BrowserOptions {
        headed: args.headed,
        executable: config::chromium_path(),
    })
    .await?;

    let mut session = ExtractionSession::new();
    let outcome = match renderer.open(&args.url, args.navigation_timeout_ms).await {
        Ok(page) => {
            let outcome = extract(&args, &page, &mut session).await;
            if let Err(e) = page.close().await {
                warn!("closing tab failed: {e:#}");
            }
            outcome
        }
        Err(e) => Err(e),
    };
    renderer.shutdown().await?;

    log_run(&args.url, session.id(), session.len(), start.elapsed(), outcome.is_ok());
    let comments = outcome?;

    if let Some(path) = &args.save {
        let json = serde_json::to_string_pretty(&comments)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("saved {} comments to {}", comments.len(), path.display());
    }

    if !output::is_quiet() && !output::is_json() {
        eprintln!(
            "  {} Successfully scraped {} {} comments",
            s.ok_sym(),
            comments.len(),
            args.platform
        );
    }

    if args.analyze {
        analyze_cmd::analyze_and_export(&comments, args.out.clone(), args.platform)?;
    } else if output::is_json() {
        output::print_json(&serde_json::json!({ "comments": comments }));
    }

    Ok(())
}

/// Run one extraction over `page`, driving the progress display.
async fn extract(
    args: &ScrapeArgs,
    page: &dyn RenderContext,
    session: &mut ExtractionSession,
) -> Result<Vec<CommentRecord>> {
    let extractor = Extractor::new(args.platform, args.extractor.clone());
    let bar = (!output::is_quiet() && !output::is_json())
        .then(|| progress::create_spinner("Loading comments..."));

    let events = extractor.extract(page, session)?;
    drain(events, bar.as_ref()).await
}

/// Consume events up to the terminal one. A stream that ends without
/// `Complete` or `Error` is an error too.
async fn drain(
    events: impl Stream<Item = ExtractionEvent>,
    bar: Option<&ProgressBar>,
) -> Result<Vec<CommentRecord>> {
    tokio::pin!(events);

    let mut terminal = None;
    while let Some(event) = events.next().await {
        match event {
            ExtractionEvent::Progress { current, total } => {
                if let Some(bar) = bar {
                    progress::update(bar, current, total);
                }
            }
            done => {
                terminal = Some(done);
                break;
            }
        }
    }

    let s = Styled::new();
    match terminal {
        Some(ExtractionEvent::Complete { comments }) => {
            if let Some(bar) = bar {
                progress::finish(bar, &format!("{} {} comments", s.ok_sym(), comments.len()));
            }
            Ok(comments)
        }
        Some(ExtractionEvent::Error { message }) => {
            if let Some(bar) = bar {
                progress::finish(bar, &format!("{} {message}", s.fail_sym()));
            }
            bail!(message)
        }
        _ => bail!("extraction ended without a result"),
    }
}

fn log_run(url: &str, session_id: &str, records: usize, elapsed: Duration, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    let logged = RunLog::default_log().and_then(|mut log| {
        log.log_run(
            "scrape",
            Some(url),
            Some(session_id),
            records,
            elapsed.as_millis() as u64,
            status,
        )
    });
    if let Err(e) = logged {
        warn!("could not write run log: {e:#}");
    }
}
