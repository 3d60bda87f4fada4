// src/crawl/frontier.rs
// =============================================================================
// The frontier holds the crawl's two URL sets:
// - pending: discovered but not fetched yet, with the page that linked it
// - visited: fetched (successfully or not), with the resulting status
//
// Rules:
// - a URL is only added to pending if it is in scope (starts with the start
//   URL) and is neither pending nor visited already
// - the first page to link a URL is its referer; later discoveries are dropped
// - mark_visited moves a URL from pending to visited, exactly once
//
// Both sets are IndexMaps so batches come out in discovery order and the
// visit log comes out in visit order.
// =============================================================================

use indexmap::IndexMap;
use serde::Serialize;

/// A URL waiting to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    pub url: String,
    /// Page the URL was first discovered on.
    pub referer: String,
}

/// A URL whose fetch has completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitedRecord {
    pub url: String,
    /// HTTP status, or 0 when the request never got a response.
    pub status: u16,
}

#[derive(Debug)]
pub struct Frontier {
    start_url: String,
    pending: IndexMap<String, PendingEntry>,
    visited: IndexMap<String, VisitedRecord>,
}

impl Frontier {
    /// Creates an empty frontier scoped to `start_url`.
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            pending: IndexMap::new(),
            visited: IndexMap::new(),
        }
    }

    pub fn start_url(&self) -> &str {
        &self.start_url
    }

    /// Whether `url` falls under the start URL prefix.
    pub fn in_scope(&self, url: &str) -> bool {
        url.starts_with(&self.start_url)
    }

    /// Adds `url` to pending unless it is out of scope or already known.
    /// Returns whether the URL was added.
    pub fn enqueue(&mut self, url: &str, referer: &str) -> bool {
        if !self.in_scope(url) || self.pending.contains_key(url) || self.visited.contains_key(url) {
            return false;
        }
        self.pending.insert(
            url.to_string(),
            PendingEntry {
                url: url.to_string(),
                referer: referer.to_string(),
            },
        );
        true
    }

    /// Returns up to `limit` pending entries (all of them for `None`) in
    /// discovery order. Entries stay pending until `mark_visited`.
    pub fn next_batch(&self, limit: Option<usize>) -> Vec<PendingEntry> {
        let take = limit.unwrap_or(self.pending.len());
        self.pending.values().take(take).cloned().collect()
    }

    /// Records the outcome of fetching `url` and removes it from pending.
    pub fn mark_visited(&mut self, url: &str, status: u16) {
        self.pending.shift_remove(url);
        if self.visited.contains_key(url) {
            tracing::warn!(url, "URL marked visited twice, keeping first status");
            return;
        }
        self.visited.insert(
            url.to_string(),
            VisitedRecord {
                url: url.to_string(),
                status,
            },
        );
    }

    /// Referer of a URL that is still pending.
    pub fn referer(&self, url: &str) -> Option<&str> {
        self.pending.get(url).map(|entry| entry.referer.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains_key(url)
    }

    pub fn visited(&self) -> impl Iterator<Item = &VisitedRecord> {
        self.visited.values()
    }

    /// Consumes the frontier, returning the visit log in visit order.
    pub fn into_visited(self) -> Vec<VisitedRecord> {
        self.visited.into_values().collect()
    }
}
