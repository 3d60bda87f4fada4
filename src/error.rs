// src/error.rs
// =============================================================================
// Typed errors for the crawler library.
//
// Only two things can go wrong in a way the caller has to know about:
// - a reference that cannot be resolved into a URL (skipped, never fatal)
// - a crawl that cannot start (bad start URL, HTTP client construction)
//
// Everything that happens while fetching a page is folded into a
// FetchOutcome instead, so it never shows up here.
// =============================================================================

use thiserror::Error;

/// A reference that could not be resolved against its base URL.
#[derive(Debug, Error)]
#[error("cannot resolve '{reference}' against '{base}': {source}")]
pub struct NormalizeError {
    pub reference: String,
    pub base: String,
    #[source]
    pub source: url::ParseError,
}

/// Errors that stop a crawl before the first request goes out.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid start URL '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type Result<T, E = CrawlError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_error_message_names_reference_and_base() {
        let err = NormalizeError {
            reference: "http://[bad".to_string(),
            base: "https://example.com/".to_string(),
            source: url::ParseError::InvalidIpv6Address,
        };
        let message = err.to_string();
        assert!(message.contains("http://[bad"));
        assert!(message.contains("https://example.com/"));
    }
}
