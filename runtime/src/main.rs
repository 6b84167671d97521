use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commentscope_runtime::cli::output::Styled;
use commentscope_runtime::cli::scrape_cmd::ScrapeArgs;
use commentscope_runtime::cli::{analyze_cmd, classify_cmd, run_cmd, scrape_cmd};
use commentscope_runtime::platform::Platform;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "commentscope",
    version,
    about = "Extract comments from video pages and score their sentiment"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Machine-readable JSON output.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Debug logging.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract comments from a video page, analyze them, write CSV.
    Scrape {
        url: String,
        #[arg(long, value_enum, default_value = "youtube")]
        platform: Platform,
        /// CSV output path.
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Also save the raw comments as JSON.
        #[arg(long)]
        save: Option<PathBuf>,
        /// Show the browser window.
        #[arg(long)]
        headed: bool,
        /// Only extract; skip analysis and CSV.
        #[arg(long)]
        no_analyze: bool,
        /// Seconds to wait for the comments section.
        #[arg(long, default_value_t = 30)]
        container_timeout: u64,
        /// Milliseconds between loading scrolls.
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
        /// Upper bound in seconds on scroll-loading; 0 disables it.
        #[arg(long, default_value_t = 120)]
        max_load_secs: u64,
    },
    /// Analyze comments saved with `scrape --save`.
    Analyze {
        input: PathBuf,
        #[arg(long, short)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "youtube")]
        platform: Platform,
    },
    /// Score a single piece of text.
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Run a JSON start command ({"action":"start","platform":"youtube"}) against a URL.
    Run { command: PathBuf, url: String },
    /// Print shell completions.
    Completions { shell: clap_complete::Shell },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("commentscope_runtime={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.json {
        std::env::set_var("COMMENTSCOPE_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("COMMENTSCOPE_QUIET", "1");
    }
    if cli.no_color {
        std::env::set_var("COMMENTSCOPE_NO_COLOR", "1");
    }

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("failed to initialize logging: {e:#}");
    }

    if let Err(e) = dispatch(cli.command).await {
        let s = Styled::new();
        eprintln!("  {} {e:#}", s.fail_sym());
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Scrape {
            url,
            platform,
            out,
            save,
            headed,
            no_analyze,
            container_timeout,
            tick_ms,
            max_load_secs,
        } => {
            let mut args = ScrapeArgs::new(&url, platform);
            args.out = out;
            args.save = save;
            args.headed = headed;
            args.analyze = !no_analyze;
            args.extractor.container_timeout = Duration::from_secs(container_timeout);
            args.extractor.loader.tick = Duration::from_millis(tick_ms);
            args.extractor.loader.max_duration =
                (max_load_secs > 0).then(|| Duration::from_secs(max_load_secs));
            scrape_cmd::run(args).await
        }
        Commands::Analyze {
            input,
            out,
            platform,
        } => analyze_cmd::run(&input, out, platform).await,
        Commands::Classify { text } => classify_cmd::run(&text.join(" ")),
        Commands::Run { command, url } => run_cmd::run(&command, &url).await,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "commentscope",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
