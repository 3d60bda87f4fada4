// src/config.rs
// =============================================================================
// Run configuration.
//
// CrawlConfig drives the engine (what to crawl and what to report),
// FetchConfig drives the HTTP transport (how every request is made).
// Both are plain structs with sensible defaults; the CLI fills them in.
// =============================================================================

use std::num::NonZeroUsize;
use std::time::Duration;

/// Settings for a single crawl run.
#[derive(Debug, Clone, Default)]
pub struct CrawlConfig {
    /// Crawl root; also the prefix every followed link must start with.
    pub start_url: String,
    /// Suppress reports for clean 200 visits.
    pub errors_only: bool,
    /// Detect and report references to resources outside the start site.
    pub show_external_resources: bool,
    /// Maximum number of URLs fetched per round. `None` means all pending.
    pub limit: Option<NonZeroUsize>,
}

impl CrawlConfig {
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            ..Self::default()
        }
    }
}

/// Transport settings shared by every request of a run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    /// 0 disables redirect following entirely.
    pub max_redirects: usize,
    /// Bind outgoing connections to an IPv4 address so DNS answers are
    /// only usable over IPv4.
    pub ipv4_only: bool,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            ipv4_only: false,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
