// src/extract/normalize.rs
// =============================================================================
// Turns href/src values into absolute, comparable URL strings.
//
// Resolution follows the WHATWG URL rules implemented by the `url` crate:
//   base = "https://example.com/docs/page"
//   "/about"              -> "https://example.com/about"
//   "../other"            -> "https://example.com/other"
//   "//cdn.example.net/x" -> "https://cdn.example.net/x"
//   "?q=1"                -> "https://example.com/docs/page?q=1"
//
// The fragment is dropped so that "page#a" and "page#b" are one frontier key.
// A reference that cannot be resolved is an error for the caller to skip;
// it is never fatal to the crawl.
// =============================================================================

use tracing::debug;
use url::Url;

use crate::error::NormalizeError;

/// Resolves `reference` against `base` and returns the normalized URL.
pub fn normalize(reference: &str, base: &str) -> Result<String, NormalizeError> {
    let base_url = Url::parse(base).map_err(|source| NormalizeError {
        reference: reference.to_string(),
        base: base.to_string(),
        source,
    })?;
    resolve(&base_url, reference)
}

/// Same as [`normalize`] with an already-parsed base, so a page's
/// references don't re-parse the page URL each time.
pub fn resolve(base: &Url, reference: &str) -> Result<String, NormalizeError> {
    match base.join(reference.trim()) {
        Ok(mut url) => {
            url.set_fragment(None);
            Ok(url.into())
        }
        Err(source) => {
            debug!(reference, base = %base, error = %source, "skipping unresolvable reference");
            Err(NormalizeError {
                reference: reference.to_string(),
                base: base.to_string(),
                source,
            })
        }
    }
}

/// Only http(s) targets can be fetched or reported as resources.
/// mailto:, tel:, javascript: and data: references resolve fine but are noise.
pub fn is_web_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_link() {
        let result = normalize("https://other.com", "https://example.com/page");
        assert_eq!(result.unwrap(), "https://other.com/");
    }

    #[test]
    fn test_resolve_relative_link() {
        let result = normalize("/docs", "https://example.com/page");
        assert_eq!(result.unwrap(), "https://example.com/docs");
    }

    #[test]
    fn test_resolve_path_relative_link() {
        let result = normalize("../about", "https://example.com/page/sub/");
        assert_eq!(result.unwrap(), "https://example.com/page/about");
    }

    #[test]
    fn test_resolve_protocol_relative_link() {
        let result = normalize("//cdn.example.net/app.js", "https://example.com/");
        assert_eq!(result.unwrap(), "https://cdn.example.net/app.js");
    }

    #[test]
    fn test_query_only_reference_keeps_path() {
        let result = normalize("?page=2", "https://example.com/list");
        assert_eq!(result.unwrap(), "https://example.com/list?page=2");
    }

    #[test]
    fn test_fragment_is_dropped() {
        let result = normalize("#section", "https://example.com/page");
        assert_eq!(result.unwrap(), "https://example.com/page");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let result = normalize("  /docs \n", "https://example.com/");
        assert_eq!(result.unwrap(), "https://example.com/docs");
    }

    #[test]
    fn test_malformed_ipv6_host_fails() {
        let err = normalize("http://[bad", "https://example.com/").unwrap_err();
        assert_eq!(err.source, url::ParseError::InvalidIpv6Address);
        assert_eq!(err.reference, "http://[bad");
    }

    #[test]
    fn test_invalid_base_fails() {
        assert!(normalize("/docs", "not a url").is_err());
    }

    #[test]
    fn test_is_web_url() {
        assert!(is_web_url("https://example.com/"));
        assert!(is_web_url("http://example.com/"));
        assert!(!is_web_url("mailto:test@example.com"));
        assert!(!is_web_url("data:image/png;base64,AAAA"));
    }
}
