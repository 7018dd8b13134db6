//! Sumi-Atlas main entry point
//!
//! This is the command-line interface for the Sumi-Atlas site inventory.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use sumi_atlas::config::{load_config_with_hash, Config, StorePolicy};
use sumi_atlas::crawler::crawl;
use sumi_atlas::output::{
    print_statistics, CrawlSummary, MarkdownOutput, OutputHandler, TextOutput,
};
use sumi_atlas::url::parse_seed;
use tracing_subscriber::EnvFilter;

/// Sumi-Atlas: a single-host site inventory
///
/// Sumi-Atlas crawls every page reachable from the seed URL through
/// same-host links and lists, for each page, its links, images, style
/// sheets and script files.
#[derive(Parser, Debug)]
#[command(name = "sumi-atlas")]
#[command(version)]
#[command(about = "A single-host site inventory", long_about = None)]
struct Cli {
    /// Starting URL
    #[arg(short = 'u', long = "url", default_value = "http://localhost:8000")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Also write a markdown summary to this file
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Store absolute references in resolved form instead of as written
    #[arg(long)]
    resolved: bool,

    /// Print crawl statistics after the report
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_ref())?;
    if cli.resolved {
        config.crawler.store_policy = StorePolicy::Resolved;
    }

    let seed = parse_seed(&cli.url).with_context(|| format!("Invalid seed URL '{}'", cli.url))?;

    tracing::info!("Starting crawl at {}", cli.url);
    let started_at = Utc::now();
    let registry = crawl(&config, &cli.url).await?;
    let finished_at = Utc::now();

    let summary = CrawlSummary::new(&seed, started_at, finished_at, &registry);

    let mut handlers: Vec<Box<dyn OutputHandler>> =
        vec![Box::new(TextOutput::new(std::io::stdout()))];

    let summary_path = cli
        .summary
        .or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));
    if let Some(path) = summary_path {
        handlers.push(Box::new(MarkdownOutput::new(path)));
    }

    for handler in &mut handlers {
        handler
            .write_report(&summary, &registry)
            .context("Failed to write report")?;
    }

    if cli.stats {
        println!();
        print_statistics(&summary.statistics);
    }

    Ok(())
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the report on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_atlas=info,warn"),
            1 => EnvFilter::new("sumi_atlas=debug,info"),
            2 => EnvFilter::new("sumi_atlas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
