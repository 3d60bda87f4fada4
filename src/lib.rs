//! Breadth-first website crawler.
//!
//! Starting from one URL, visits every page reachable through same-site
//! links, reports the HTTP outcome of each visit and, optionally, the
//! stylesheets, scripts, frames and images a page pulls in from other sites.
//!
//! ```no_run
//! use site_crawler::{ConsoleReporter, CrawlConfig, Crawler, FetchConfig, HttpFetcher};
//!
//! # async fn demo() -> Result<(), site_crawler::CrawlError> {
//! let fetcher = HttpFetcher::new(&FetchConfig::default())?;
//! let mut crawler = Crawler::new(
//!     CrawlConfig::new("https://example.com"),
//!     fetcher,
//!     ConsoleReporter::stdout(),
//! );
//! let summary = crawler.run().await?;
//! println!("{} pages", summary.visited.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod report;

pub use config::{CrawlConfig, FetchConfig};
pub use crawl::{CrawlState, CrawlSummary, Crawler, Frontier, PendingEntry, VisitedRecord};
pub use error::{CrawlError, NormalizeError};
pub use extract::{extract, normalize, Extraction, ExternalResource};
pub use fetch::{FetchOutcome, Fetcher, HttpFetcher};
pub use report::{ConsoleReporter, JsonReporter, Reporter, VisitReport};
