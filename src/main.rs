//! Contact-Sieve main entry point
//!
//! This is the command-line interface for the Contact-Sieve contact scraper.

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use contact_sieve::config::{load_config_with_hash, validate, Config};
use contact_sieve::output::{print_summary, write_results, OutputFormat, RunInfo};
use contact_sieve::Coordinator;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Contact-Sieve: a polite contact directory builder
///
/// Scrapes email addresses, and the names that go with them, from the given
/// pages. With --crawl-website each URL's domain is crawled within a page
/// budget, contact and staff pages first, respecting robots.txt.
#[derive(Parser, Debug)]
#[command(name = "contact-sieve")]
#[command(version)]
#[command(about = "A polite contact directory builder", long_about = None)]
struct Cli {
    /// URLs to scrape, or to start crawling from
    #[arg(value_name = "URLS")]
    urls: Vec<String>,

    /// Crawl each URL's website instead of scraping only the given pages
    #[arg(long)]
    crawl_website: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds to wait between requests
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Maximum pages to scrape per website
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Maximum link depth from the start URLs
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Ignore robots.txt
    #[arg(long)]
    no_robots: bool,

    /// Output format
    #[arg(long, value_enum, value_name = "FORMAT")]
    output: Option<OutputFormat>,

    /// Output filename without extension
    #[arg(long, value_name = "BASE")]
    filename: Option<String>,

    /// Characters searched on each side of an email for a name
    #[arg(long, value_name = "N")]
    context_window: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching anything
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the file configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(delay) = self.delay {
            config.crawler.request_delay = delay;
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(max_depth) = self.max_depth {
            config.crawler.max_depth = max_depth;
        }
        if self.no_robots {
            config.crawler.respect_robots = false;
        }
        if let Some(format) = self.output {
            config.output.format = format;
        }
        if let Some(filename) = &self.filename {
            config.output.filename = filename.clone();
        }
        if let Some(window) = self.context_window {
            config.extraction.context_window = window;
        }
        config.seeds.extend(self.urls.iter().cloned());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, Some(hash))
        }
        None => (Config::default(), None),
    };

    cli.apply_overrides(&mut config);
    validate(&config).context("Invalid configuration")?;

    if config.seeds.is_empty() {
        bail!("No URLs given; pass them as arguments or list them under `seeds` in the config file");
    }

    if cli.dry_run {
        handle_dry_run(&config, cli.crawl_website);
        return Ok(());
    }

    handle_scrape(config, config_hash, cli.crawl_website, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("contact_sieve=info,warn"),
            1 => EnvFilter::new("contact_sieve=debug,info"),
            2 => EnvFilter::new("contact_sieve=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration and seeds
fn handle_dry_run(config: &Config, crawl_website: bool) {
    println!("=== Contact-Sieve Dry Run ===\n");

    println!("Mode: {}", if crawl_website { "crawl website" } else { "single pages" });

    println!("\nCrawler Configuration:");
    println!("  Request delay: {}s", config.crawler.request_delay);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages per website: {}", config.crawler.max_pages);
    println!("  Max regular links per page: {}", config.crawler.max_regular_links);
    println!("  Respect robots.txt: {}", config.crawler.respect_robots);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nExtraction:");
    println!("  Context window: {} chars", config.extraction.context_window);

    println!("\nOutput:");
    println!(
        "  File: {}.{}",
        config.output.filename,
        config.output.format.extension()
    );

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape: crawl or single pages, then summary and output
async fn handle_scrape(
    config: Config,
    config_hash: Option<String>,
    crawl_website: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let run = RunInfo {
        started_at: Utc::now(),
        config_hash,
    };
    let seeds = config.seeds.clone();
    let format = config.output.format;
    let filename = config.output.filename.clone();

    let mut coordinator = Coordinator::new(config).context("Failed to set up crawler")?;

    // Ctrl-C stops the crawl; results gathered so far are still written
    let stop = coordinator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page and stopping");
            stop.store(true, Ordering::SeqCst);
        }
    });

    let results = if crawl_website {
        tracing::info!("Starting crawl of {} seed URL(s)", seeds.len());
        coordinator.crawl(&seeds).await
    } else {
        tracing::info!("Starting to scrape {} page(s)", seeds.len());
        coordinator.scrape_pages(&seeds).await
    };

    if !quiet {
        print_summary(&results);
    }

    let path = match write_results(Path::new("."), &filename, format, &results, &run) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Failed to write results: {}", e);
            return Err(e).context("Failed to write results");
        }
    };
    if !quiet {
        println!("\nResults saved to {}", path.display());
    }

    Ok(())
}
