//! Shigoto main entry point
//!
//! Command-line interface for the shigoto job-board crawler.

use anyhow::Context;
use clap::Parser;
use shigoto::config::load_config_with_hash;
use shigoto::output::build_sink;
use shigoto::page::{launch_browser, ChromiumPage};
use shigoto::scrape::{run_crawl, search_space};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Shigoto: a job-board crawler
///
/// Walks every combination of search term and location on the configured
/// job board, extracting structured job records into JSON files and/or a
/// SQLite database. Interrupting with Ctrl-C stops the crawl at the next
/// safe point.
#[derive(Parser, Debug)]
#[command(name = "shigoto")]
#[command(version = "1.0.0")]
#[command(about = "A job-board crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Run the browser with a visible window, overriding the config
    #[arg(long)]
    headed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) =
        load_config_with_hash(&cli.config).context("failed to load configuration")?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.headed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shigoto=info,warn"),
            1 => EnvFilter::new("shigoto=debug,info"),
            2 => EnvFilter::new("shigoto=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the search space
fn handle_dry_run(config: &shigoto::Config) {
    println!("=== Shigoto Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Selector timeout: {}ms", config.crawler.selector_timeout_ms);
    println!("  Fetch descriptions: {}", config.crawler.fetch_descriptions);
    println!("  Headless: {}", config.crawler.headless);

    println!("\nRetry Policy:");
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!("  Base delay: {}ms", config.retry.base_delay_ms);
    println!(
        "  Excluded status codes: {:?}",
        config.retry.excluded_status_codes
    );

    println!("\nOutput:");
    println!("  Data directory: {:?}", config.output.data_dir);
    println!("  Database: {:?}", config.output.database_path);

    let queries = search_space(&config.search.locations, &config.search.technologies);
    println!(
        "\nSearch space: {} locations x {} technologies = {} queries",
        config.search.locations.len(),
        config.search.technologies.len(),
        queries.len()
    );
    for query in queries.iter().take(10) {
        println!("  - {}", query);
    }
    if queries.len() > 10 {
        println!("  ... and {} more", queries.len() - 10);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: shigoto::Config, headed: bool) -> anyhow::Result<()> {
    let headless = !headed && config.crawler.headless;

    tracing::info!("Launching Chromium (headless: {})", headless);
    let (mut browser, handler_task) = launch_browser(headless)
        .await
        .context("failed to launch browser")?;
    let page = ChromiumPage::open(&browser)
        .await
        .context("failed to open page")?;

    let mut sink = build_sink(&config.output).context("failed to set up output sinks")?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received; stopping at the next safe point");
                cancel.cancel();
            }
        });
    }

    let result = run_crawl(&page, &config, sink.as_mut(), cancel).await;

    if let Err(e) = browser.close().await {
        tracing::debug!("Browser close failed: {}", e);
    }
    handler_task.abort();

    let report = result.context("crawl failed")?;

    println!("\n=== Crawl Summary ===");
    println!(
        "Queries: {} ({} failed)",
        report.queries_processed, report.queries_failed
    );
    println!("Pages emitted: {}", report.pages_emitted);
    println!("Records: {}", report.records_emitted);
    println!("Item faults: {}", report.item_faults);
    println!("Sink failures: {}", report.sink_failures);
    if report.cancelled {
        println!("Run was interrupted before completing the search space");
    }

    Ok(())
}
