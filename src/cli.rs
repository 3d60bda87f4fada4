// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The start URL is a required positional argument, so running without one
// is a usage error and nothing gets crawled.
// =============================================================================

use clap::Parser;
use std::num::NonZeroUsize;
use std::time::Duration;

use site_crawler::{CrawlConfig, FetchConfig};

#[derive(Parser, Debug)]
#[command(
    name = "site-crawler",
    version,
    about = "Crawl a website and report the status of every page",
    long_about = "site-crawler starts at a URL, follows every link that stays under it, \
                  and reports the HTTP status of each page it visits. It can also list \
                  stylesheets, scripts, frames and images that a page loads from other sites."
)]
pub struct Cli {
    /// URL to start crawling from; only links under it are followed
    ///
    /// Example: site-crawler https://example.com/docs/
    pub start_url: String,

    /// Only report failed pages and pages with external resources
    #[arg(long)]
    pub errors_only: bool,

    /// Report resources loaded from outside the start URL
    #[arg(long)]
    pub show_external_resources: bool,

    /// Maximum number of pages fetched at once
    #[arg(long)]
    pub limit: Option<NonZeroUsize>,

    /// Output one JSON object per page instead of colored text
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// How many redirects to follow (0 = report redirects as-is)
    #[arg(long, default_value_t = 5)]
    pub max_redirects: usize,

    /// Connect over IPv4 only
    #[arg(long)]
    pub ipv4: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            start_url: self.start_url.clone(),
            errors_only: self.errors_only,
            show_external_resources: self.show_external_resources,
            limit: self.limit,
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.timeout),
            max_redirects: self.max_redirects,
            ipv4_only: self.ipv4,
            ..FetchConfig::default()
        }
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "site_crawler=warn",
            1 => "site_crawler=info",
            _ => "site_crawler=debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_url_is_required() {
        assert!(Cli::try_parse_from(["site-crawler"]).is_err());
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "site-crawler",
            "https://example.com",
            "--errors-only",
            "--show-external-resources",
            "--limit",
            "4",
            "--ipv4",
        ])
        .unwrap();

        let crawl = cli.crawl_config();
        assert_eq!(crawl.start_url, "https://example.com");
        assert!(crawl.errors_only);
        assert!(crawl.show_external_resources);
        assert_eq!(crawl.limit, NonZeroUsize::new(4));
        assert!(cli.fetch_config().ipv4_only);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        assert!(Cli::try_parse_from(["site-crawler", "https://example.com", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["site-crawler", "https://example.com"]).unwrap();
        assert_eq!(cli.crawl_config().limit, None);
        assert_eq!(cli.fetch_config().timeout, Duration::from_secs(10));
        assert_eq!(cli.fetch_config().max_redirects, 5);
        assert_eq!(cli.log_directive(), "site_crawler=warn");
    }
}
