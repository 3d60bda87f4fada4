// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling in rounds, starting from one URL
// - Stays under the start URL (prefix match), never leaves the site
// - Each URL is fetched at most once per run
// - Optional cap on how many URLs are fetched per round
//
// Submodules:
// - frontier: the visited/pending bookkeeping
// - engine: the fetch, extract, report loop
// =============================================================================

mod engine;
mod frontier;

pub use engine::{CrawlState, CrawlSummary, Crawler};
pub use frontier::{Frontier, PendingEntry, VisitedRecord};
