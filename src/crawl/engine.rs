// src/crawl/engine.rs
// =============================================================================
// This module drives the crawl in rounds.
//
// One round:
// 1. Take the next batch of pending URLs from the frontier
// 2. Fetch the whole batch concurrently and wait until every request settles
// 3. Walk the outcomes in request order:
//    a. extract links from the body and enqueue the in-scope ones
//    b. report the visit
//    c. mark the URL visited
// 4. Repeat while anything is pending
//
// Nothing touches the frontier while requests are in flight, so it needs no
// locking. The crawl ends because enqueue refuses visited URLs: every round
// moves at least one URL into visited for good, and a finite site has
// finitely many URLs.
// =============================================================================

use tracing::{debug, info, warn};
use url::Url;

use super::frontier::{Frontier, PendingEntry, VisitedRecord};
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::extract::{extract, ExternalResource};
use crate::fetch::{FetchOutcome, Fetcher};
use crate::report::{Reporter, VisitReport};

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Constructed, not started.
    Idle,
    /// Fetching a batch.
    Running,
    /// Processing a settled batch.
    Draining,
    /// Nothing left to fetch.
    Done,
}

/// What a finished crawl leaves behind.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// One record per visited URL, in visit order.
    pub visited: Vec<VisitedRecord>,
    pub rounds: usize,
}

impl CrawlSummary {
    /// Visits that did not come back as 200.
    pub fn failures(&self) -> impl Iterator<Item = &VisitedRecord> {
        self.visited.iter().filter(|record| record.status != 200)
    }
}

pub struct Crawler<F, R> {
    config: CrawlConfig,
    fetcher: F,
    reporter: R,
    state: CrawlState,
}

impl<F: Fetcher, R: Reporter> Crawler<F, R> {
    pub fn new(config: CrawlConfig, fetcher: F, reporter: R) -> Self {
        Self {
            config,
            fetcher,
            reporter,
            state: CrawlState::Idle,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Crawls everything reachable from the start URL.
    ///
    /// Only fails if the start URL is unusable; every per-page problem is
    /// reported and the crawl moves on.
    pub async fn run(&mut self) -> Result<CrawlSummary> {
        let start_url = parse_start_url(&self.config.start_url)?;
        let mut frontier = Frontier::new(start_url.clone());
        frontier.enqueue(&start_url, &start_url);

        let limit = self.config.limit.map(|n| n.get());
        let mut rounds = 0;

        while !frontier.is_empty() {
            rounds += 1;
            let batch = frontier.next_batch(limit);
            info!(
                round = rounds,
                batch = batch.len(),
                pending = frontier.pending_len(),
                "dispatching batch"
            );

            self.state = CrawlState::Running;
            let urls: Vec<String> = batch.iter().map(|entry| entry.url.clone()).collect();
            let mut outcomes = self.fetcher.fetch_all(&urls).await.into_iter();

            // Outcomes pair with the batch by position, so every dispatched
            // entry leaves pending this round whatever the fetcher returned
            self.state = CrawlState::Draining;
            for entry in &batch {
                let outcome = outcomes.next().unwrap_or_else(|| {
                    warn!(url = %entry.url, "fetcher returned no outcome");
                    FetchOutcome::transport_failure(entry.url.as_str(), "no response from fetcher")
                });
                self.process(&mut frontier, entry, &outcome);
            }
        }

        self.state = CrawlState::Done;
        let visited = frontier.into_visited();
        info!(visited = visited.len(), rounds, "crawl finished");
        Ok(CrawlSummary { visited, rounds })
    }

    // Handles one settled fetch: extract, enqueue, report, mark visited
    fn process(&mut self, frontier: &mut Frontier, entry: &PendingEntry, outcome: &FetchOutcome) {
        let url = entry.url.as_str();
        let include_external = self.config.show_external_resources;

        // After redirects the body belongs to final_url, which is the base
        // for its relative links
        let page_url = outcome.final_url.as_str();

        let mut externals: Vec<ExternalResource> = Vec::new();
        if let Some(body) = &outcome.body {
            let extraction = extract(body, page_url, frontier.start_url(), include_external);
            let mut added = 0;
            for link in &extraction.links {
                if frontier.enqueue(link, url) {
                    added += 1;
                }
            }
            debug!(url, page_url, links = extraction.links.len(), added, "extracted links");
            externals = extraction.externals;
        }

        self.reporter.report(&VisitReport {
            url,
            referer: &entry.referer,
            outcome,
            errors_only: self.config.errors_only,
            externals: include_external.then_some(externals.as_slice()),
        });

        frontier.mark_visited(url, outcome.status);
    }
}

// The serialized form of the start URL is the scope prefix, so
// "https://site.example" and a link to "/" land on the same key.
fn parse_start_url(raw: &str) -> Result<String> {
    let invalid = |reason: String| CrawlError::InvalidStartUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    url.set_fragment(None);
    Ok(url.into())
}
