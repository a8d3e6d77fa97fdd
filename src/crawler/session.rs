//! Crawl session
//!
//! Everything one run shares: the configuration, the HTTP client, the name
//! heuristic, the robots.txt cache, request pacing and the stop signal. A
//! session is built once from a [`Config`] and dropped when the run ends.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
use crate::extract::{Extractor, NameMatcher};
use crate::robots::{self, fetch_robots, RobotsCache};
use crate::url::{origin_key, robots_url};
use crate::Result;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Enforces the minimum gap between consecutive requests
#[derive(Debug)]
pub struct Pacer {
    last_request: Option<Instant>,
}

impl Pacer {
    pub fn new() -> Self {
        Self { last_request: None }
    }

    /// Time still to wait before a request with the given gap may start
    pub fn time_until_next_request(&self, gap: Duration, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.duration_since(last);
        (elapsed < gap).then(|| gap - elapsed)
    }

    /// Sleeps until `gap` has passed since the previous request, then
    /// records a new request
    pub async fn wait_turn(&mut self, gap: Duration) {
        if let Some(wait) = self.time_until_next_request(gap, Instant::now()) {
            tokio::time::sleep(wait).await;
        }
        self.last_request = Some(Instant::now());
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CrawlSession {
    config: Config,
    client: Client,
    extractor: Extractor,
    robots: RobotsCache,
    pacer: Pacer,
    stop: Arc<AtomicBool>,
}

impl CrawlSession {
    /// Creates a session; fails only if the HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let extractor = Extractor::from_config(&config.extraction);

        Ok(Self {
            config,
            client,
            extractor,
            robots: RobotsCache::new(),
            pacer: Pacer::new(),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replaces the name heuristic
    pub fn with_name_matcher(mut self, matcher: impl NameMatcher + 'static) -> Self {
        self.extractor = Extractor::new(matcher);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Handle that stops the crawl at the next frontier pop when set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Checks robots.txt for a URL, fetching the origin's file on first use
    ///
    /// Always true, without any request, when robots handling is disabled.
    pub async fn is_allowed(&mut self, url: &Url) -> bool {
        if !self.config.crawler.respect_robots {
            return true;
        }

        let origin = origin_key(url);
        if self.robots.get(&origin).is_none() {
            let policy = match robots_url(url) {
                Some(location) => {
                    let gap = self.base_delay();
                    self.pacer.wait_turn(gap).await;
                    fetch_robots(&self.client, &location).await
                }
                None => robots::ParsedRobots::allow_all(),
            };
            self.robots.insert(origin.clone(), policy);
        }

        let allowed = robots::is_allowed(
            self.robots.get(&origin),
            url,
            &self.config.user_agent.crawler_name,
            true,
        );
        debug!(url = %url, allowed, "robots.txt check");
        allowed
    }

    /// Fetches a page once, after waiting out the inter-request delay
    pub async fn fetch(&mut self, url: &Url) -> std::result::Result<FetchedPage, FetchError> {
        let gap = self.delay_for(url);
        self.pacer.wait_turn(gap).await;
        fetch_page(&self.client, url).await
    }

    fn base_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.config.crawler.request_delay).unwrap_or(Duration::ZERO)
    }

    /// Configured delay, raised to the origin's robots.txt `Crawl-delay`
    fn delay_for(&self, url: &Url) -> Duration {
        let base = self.base_delay();
        if !self.config.crawler.respect_robots {
            return base;
        }

        self.robots
            .get(&origin_key(url))
            .and_then(|r| r.crawl_delay(&self.config.user_agent.crawler_name))
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .map_or(base, |robots_delay| base.max(robots_delay))
    }
}

impl std::fmt::Debug for CrawlSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlSession")
            .field("config", &self.config)
            .field("robots_cached", &self.robots.len())
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}
