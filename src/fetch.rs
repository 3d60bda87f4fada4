// src/fetch.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One GET per URL, a whole batch at a time, results in request order
// - Every request ends in a FetchOutcome: HTTP errors (404, 500, ...) are
//   ordinary outcomes, and transport failures (timeouts, DNS, TLS, refused
//   connections) become status 0 with a description
// - One shared client per run, so timeout, redirect and IPv4 settings are
//   the same for every request
//
// The crawl engine only depends on the Fetcher trait, which lets tests swap
// the network for an in-memory site.
// =============================================================================

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};
use tracing::warn;

use crate::config::FetchConfig;
use crate::error::Result;

/// The result of fetching one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchOutcome {
    pub requested_url: String,
    /// URL the response actually came from once redirects were followed.
    /// Relative links in the body resolve against this one.
    pub final_url: String,
    /// HTTP status code, or 0 when no response was received.
    pub status: u16,
    /// Reason phrase for HTTP responses, error description for failures.
    pub status_text: String,
    /// Page source, when the response carried an HTML body.
    #[serde(skip)]
    pub body: Option<String>,
}

impl FetchOutcome {
    /// Outcome for a request that never produced an HTTP response.
    pub fn transport_failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            requested_url: url,
            status: 0,
            status_text: message.into(),
            body: None,
        }
    }

    /// Plain 200 responses count as clean.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a single URL. Must not fail: errors become a status 0 outcome.
    async fn fetch(&self, url: &str) -> FetchOutcome;

    /// Fetches every URL concurrently and waits for all of them to settle.
    /// Outcomes are returned in the order of `urls`, not completion order.
    async fn fetch_all(&self, urls: &[String]) -> Vec<FetchOutcome> {
        join_all(urls.iter().map(|url| self.fetch(url))).await
    }
}

/// Fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let redirects = match config.max_redirects {
            0 => redirect::Policy::none(),
            n => redirect::Policy::limited(n),
        };

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .redirect(redirects)
            .user_agent(config.user_agent.clone());

        // Binding to 0.0.0.0 means only IPv4 addresses can be connected to
        if config.ipv4_only {
            builder = builder.local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let message = describe_error(&e);
                warn!(url, error = %message, "request failed");
                return FetchOutcome::transport_failure(url, message);
            }
        };

        let final_url = response.url().to_string();
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("").to_string();

        let body = if is_html(&response) {
            match response.text().await {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(url, error = %e, "failed to read response body");
                    None
                }
            }
        } else {
            None
        };

        FetchOutcome {
            requested_url: url.to_string(),
            final_url,
            status: status.as_u16(),
            status_text,
            body,
        }
    }
}

// A missing Content-Type is treated as HTML, anything else must say so
fn is_html(response: &reqwest::Response) -> bool {
    match response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        None => true,
        Some(content_type) => {
            let content_type = content_type.to_ascii_lowercase();
            content_type.contains("text/html") || content_type.contains("application/xhtml")
        }
    }
}

// Categorizes reqwest errors into a readable status text
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn describe_error(error: &reqwest::Error) -> String {
    let detail = error.to_string();
    let lowered = detail.to_lowercase();

    let kind = if error.is_timeout() {
        "request timed out"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_connect() {
        if lowered.contains("dns") {
            "could not resolve hostname"
        } else {
            "connection failed"
        }
    } else if lowered.contains("certificate") || lowered.contains("ssl") || lowered.contains("tls") {
        "TLS error"
    } else {
        return detail;
    };

    format!("{kind}: {detail}")
}
