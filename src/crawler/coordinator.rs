//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that drives everything else:
//! - Grouping seeds by origin, one domain crawl at a time
//! - Popping the frontier under page-budget, depth and robots.txt limits
//! - Fetching, parsing and extracting each page within one step
//! - Feeding discovered links back into the frontier, priority links first
//!
//! No page-level error escapes the loop: a failed fetch becomes an error
//! [`PageResult`] and traversal continues.

use crate::config::Config;
use crate::crawler::fetcher::FetchedPage;
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::links::{extract_links, LinkSet};
use crate::crawler::parser::ParsedPage;
use crate::crawler::CrawlSession;
use crate::extract::Extractor;
use crate::state::{DomainState, PageResult};
use crate::url::{normalize_url, origin_key};
use crate::Result;
use std::collections::HashSet;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use url::Url;

/// Main crawler coordinator structure
///
/// Owns the [`CrawlSession`] for the lifetime of a run.
#[derive(Debug)]
pub struct Coordinator {
    session: CrawlSession,
}

impl Coordinator {
    /// Creates a coordinator with a fresh session
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::from_session(CrawlSession::new(config)?))
    }

    pub fn from_session(session: CrawlSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &CrawlSession {
        &self.session
    }

    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.session.stop_handle()
    }

    /// Crawls the domain of every seed
    ///
    /// Seeds sharing an origin are crawled together with one page budget.
    /// Origins are processed sequentially, in order of first appearance.
    /// Invalid seeds are logged and skipped.
    pub async fn crawl(&mut self, seeds: &[String]) -> Vec<PageResult> {
        let mut results = Vec::new();

        for (origin, urls) in group_by_origin(seeds) {
            if self.session.is_stopped() {
                tracing::info!("Stop requested, skipping remaining domains");
                break;
            }
            results.extend(self.crawl_domain(origin, urls).await);
        }

        results
    }

    /// Crawls one origin starting from the given seed URLs
    pub async fn crawl_domain(&mut self, origin: String, seeds: Vec<Url>) -> Vec<PageResult> {
        let crawler = self.session.config().crawler.clone();
        let mut state = DomainState::new(origin);
        let mut frontier = Frontier::new();
        let mut results = Vec::new();

        for seed in seeds {
            frontier.seed(seed);
        }

        tracing::info!("Crawling {} (budget {} pages)", state.origin, crawler.max_pages);
        state.start();

        while state.is_discovering() {
            if self.session.is_stopped() {
                tracing::info!("Stop requested, ending crawl of {}", state.origin);
                state.finish();
                continue;
            }

            if state.has_exceeded_limit(&crawler) {
                tracing::info!("Page budget reached for {}", state.origin);
                state.finish();
                continue;
            }

            let Some(entry) = frontier.pop() else {
                state.finish();
                continue;
            };

            if state.is_visited(entry.url.as_str()) {
                tracing::trace!("Already visited: {}", entry.url);
                continue;
            }

            if entry.depth > crawler.max_depth {
                tracing::debug!("Too deep ({}): {}", entry.depth, entry.url);
                continue;
            }

            if !self.session.is_allowed(&entry.url).await {
                tracing::debug!("Disallowed by robots.txt: {}", entry.url);
                continue;
            }

            state.claim(entry.url.as_str());

            let discover = entry.depth < crawler.max_depth;
            let (result, discovered) = self.visit(&entry.url, discover).await;

            tracing::info!(
                "[{}/{}] {} - {} emails ({})",
                state.pages_scraped,
                crawler.max_pages,
                result.url,
                result.emails_found(),
                result.status
            );
            results.push(result);

            if let Some((final_url, links)) = discovered {
                if final_url != entry.url && origin_key(&final_url) == state.origin {
                    state.mark_seen(final_url.as_str());
                }
                enqueue_links(
                    &mut frontier,
                    &state,
                    links,
                    entry.depth + 1,
                    crawler.max_regular_links,
                );
            }
        }

        tracing::info!(
            "Finished {}: {} pages fetched, {} left in frontier",
            state.origin,
            state.pages_scraped,
            frontier.len()
        );

        results
    }

    /// Scrapes each URL once, without following links
    ///
    /// Robots.txt and the inter-request delay still apply. URLs that normalize
    /// to the same form are scraped once; invalid URLs are skipped.
    pub async fn scrape_pages(&mut self, urls: &[String]) -> Vec<PageResult> {
        let mut seen = HashSet::new();
        let mut results = Vec::new();

        for raw in urls {
            if self.session.is_stopped() {
                tracing::info!("Stop requested, skipping remaining pages");
                break;
            }

            let url = match normalize_url(raw) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping invalid URL {}: {}", raw, e);
                    continue;
                }
            };

            if !seen.insert(url.as_str().to_string()) {
                continue;
            }

            if !self.session.is_allowed(&url).await {
                tracing::info!("Disallowed by robots.txt, skipping {}", url);
                continue;
            }

            let (result, _) = self.visit(&url, false).await;
            tracing::info!(
                "{} - {} emails ({})",
                result.url,
                result.emails_found(),
                result.status
            );
            results.push(result);
        }

        results
    }

    /// Fetches one URL and turns the response into a result
    ///
    /// When `discover` is set and the fetch succeeded, also returns the final
    /// URL and the links found on the page.
    async fn visit(&mut self, url: &Url, discover: bool) -> (PageResult, Option<(Url, LinkSet)>) {
        match self.session.fetch(url).await {
            Ok(fetched) => process_page(url, &fetched, self.session.extractor(), discover),
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                (PageResult::failure(url.as_str(), e.to_string()), None)
            }
        }
    }
}

/// Parses a fetched body, extracts records and optionally links
///
/// The parsed document is not `Send` and must not be held across an await.
fn process_page(
    url: &Url,
    fetched: &FetchedPage,
    extractor: &Extractor,
    discover: bool,
) -> (PageResult, Option<(Url, LinkSet)>) {
    let page = ParsedPage::parse(&fetched.body);
    let records = extractor.extract(&page);

    let final_url = normalize_url(fetched.final_url.as_str()).unwrap_or_else(|_| url.clone());
    let links = discover.then(|| {
        let links = extract_links(&page.document, &fetched.final_url);
        (final_url, links)
    });

    (
        PageResult::success(url.as_str(), page.title, records),
        links,
    )
}

/// Queues unvisited same-origin links at `depth`
///
/// Priority links are all queued; regular links are capped at `max_regular`.
fn enqueue_links(
    frontier: &mut Frontier,
    state: &DomainState,
    links: LinkSet,
    depth: u32,
    max_regular: usize,
) {
    let fresh = |url: &Url| !state.is_visited(url.as_str()) && origin_key(url) == state.origin;

    for url in links.priority.into_iter().filter(|u| fresh(u)) {
        frontier.push_priority(FrontierEntry::new(url, depth));
    }

    for url in links
        .regular
        .into_iter()
        .filter(|u| fresh(u))
        .take(max_regular)
    {
        frontier.push_regular(FrontierEntry::new(url, depth));
    }
}

/// Normalizes seeds and groups them by origin, keeping first-seen order
fn group_by_origin(seeds: &[String]) -> Vec<(String, Vec<Url>)> {
    let mut groups: Vec<(String, Vec<Url>)> = Vec::new();

    for seed in seeds {
        let url = match normalize_url(seed) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping invalid seed {}: {}", seed, e);
                continue;
            }
        };

        let origin = origin_key(&url);
        match groups.iter_mut().find(|(o, _)| *o == origin) {
            Some((_, urls)) => urls.push(url),
            None => groups.push((origin, vec![url])),
        }
    }

    groups
}
