// src/extract/html.rs
// =============================================================================
// This module extracts links and resource references from HTML pages.
//
// For every page we produce:
// - links: hrefs of <a> elements, resolved to absolute URLs, de-duplicated
// - externals (only when asked for): stylesheets, scripts, frames and images
//   whose resolved URL falls outside the start site, plus URL literals found
//   in inline <script> bodies
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which never rejects input: broken markup is
//   repaired the way a browser would, so extraction cannot fail
//
// This module does no network I/O. It only reads attributes and inline text
// that are already part of the page body.
// =============================================================================

use indexmap::IndexSet;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

use super::normalize::{is_web_url, resolve};
use super::script::find_url_literals;

static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static RESOURCES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("link[href], iframe[src], img[src], img[srcset], script").unwrap()
});

/// A reference from a crawled page to something hosted off-site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalResource {
    /// Page the reference was found on.
    pub source_page: String,
    /// Element that carries the reference: link, iframe, img or script.
    pub tag_kind: String,
    /// Normalized URL of the referenced resource.
    pub target_url: String,
}

/// Everything extracted from a single page.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Resolved anchor targets in document order, without duplicates.
    pub links: IndexSet<String>,
    /// Off-site references; always empty unless externals were requested.
    pub externals: Vec<ExternalResource>,
}

/// Extracts links (and optionally external resources) from a page.
///
/// `start_url` is the crawl's scope prefix: a resource whose normalized URL
/// does not start with it is external.
///
/// Example:
///   html = `<a href="/docs">Docs</a><img src="https://cdn.example.net/a.png">`
///   page_url = start_url = "https://example.com/"
///   links = ["https://example.com/docs"]
///   externals = [img -> "https://cdn.example.net/a.png"]
pub fn extract(html: &str, page_url: &str, start_url: &str, include_external: bool) -> Extraction {
    let mut extraction = Extraction::default();

    // Without a valid base URL nothing relative can be resolved
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(page_url, error = %e, "invalid page URL, skipping extraction");
            return extraction;
        }
    };

    let document = Html::parse_document(html);

    for element in document.select(&ANCHORS) {
        if let Some(href) = element.value().attr("href") {
            if let Ok(link) = resolve(&base, href) {
                extraction.links.insert(link);
            }
        }
    }

    if include_external {
        let mut collector = ExternalCollector {
            base: &base,
            page_url,
            start_url,
            found: Vec::new(),
        };
        for element in document.select(&RESOURCES) {
            collector.visit(element);
        }
        extraction.externals = collector.found;
    }

    extraction
}

// Collects external references for one page, resolving against its URL
struct ExternalCollector<'a> {
    base: &'a Url,
    page_url: &'a str,
    start_url: &'a str,
    found: Vec<ExternalResource>,
}

impl ExternalCollector<'_> {
    fn visit(&mut self, element: ElementRef<'_>) {
        let tag = element.value().name();
        match tag {
            "link" | "iframe" => {
                let attr = if tag == "link" { "href" } else { "src" };
                if let Some(value) = element.value().attr(attr) {
                    self.consider(tag, value);
                }
            }
            "img" => {
                if let Some(src) = element.value().attr("src") {
                    self.consider(tag, src);
                }
                if let Some(srcset) = element.value().attr("srcset") {
                    for candidate in srcset_urls(srcset) {
                        self.consider(tag, candidate);
                    }
                }
            }
            "script" => match element.value().attr("src") {
                Some(src) => self.consider(tag, src),
                None => {
                    let body: String = element.text().collect();
                    for literal in find_url_literals(&body) {
                        self.consider(tag, literal);
                    }
                }
            },
            _ => {}
        }
    }

    fn consider(&mut self, tag: &str, reference: &str) {
        let Ok(target) = resolve(self.base, reference) else {
            return;
        };
        if is_web_url(&target) && !target.starts_with(self.start_url) {
            self.found.push(ExternalResource {
                source_page: self.page_url.to_string(),
                tag_kind: tag.to_string(),
                target_url: target,
            });
        }
    }
}

// "a.png 1x, b.png 2x" -> ["a.png", "b.png"]
// Commas inside a data: candidate split it into pieces; none of them is an
// http(s) URL under another host, so they never surface as externals.
fn srcset_urls(srcset: &str) -> impl Iterator<Item = &str> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why IndexSet for links?
//    - A page often links the same URL several times (nav bar, footer)
//    - IndexSet drops the repeats but keeps document order, so the frontier
//      sees links in a stable order and crawls are reproducible
//
// 2. Why is the external test a prefix test?
//    - It is the same test the frontier uses for scope, so a URL is either
//      followed as a link or reported as external, never both
//
// 3. What about <script> with both src and a body?
//    - Browsers ignore the body when src is set, and so do we
// -----------------------------------------------------------------------------
