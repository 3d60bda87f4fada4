// src/report.rs
// =============================================================================
// Renders one line (or block) per visited URL.
//
// Two renderers:
// - ConsoleReporter: green "url: ..." for clean pages, a red block with
//   status, status text and referer for everything else
// - JsonReporter: one JSON object per line, for piping into other tools
//
// Both honour errors_only: a 200 visit with no external resources to show is
// suppressed. A reporter never fails the crawl; write errors are logged.
// =============================================================================

use console::style;
use serde::Serialize;
use std::io::{self, Write};
use tracing::warn;

use crate::extract::ExternalResource;
use crate::fetch::FetchOutcome;

/// Everything known about one visit at the time it is reported.
#[derive(Debug, Clone, Copy)]
pub struct VisitReport<'a> {
    pub url: &'a str,
    pub referer: &'a str,
    pub outcome: &'a FetchOutcome,
    pub errors_only: bool,
    /// `None` when external resource detection is off.
    pub externals: Option<&'a [ExternalResource]>,
}

impl VisitReport<'_> {
    pub fn has_externals(&self) -> bool {
        self.externals.is_some_and(|externals| !externals.is_empty())
    }

    /// Clean visits are hidden in errors-only mode.
    pub fn is_suppressed(&self) -> bool {
        self.errors_only && self.outcome.is_ok() && !self.has_externals()
    }
}

pub trait Reporter {
    fn report(&mut self, visit: &VisitReport<'_>);
}

/// Colored, human-readable output.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(visit: &VisitReport<'_>) -> String {
        let externals = render_externals(visit.externals);
        if visit.outcome.is_ok() {
            let text = format!("url: {}{}", visit.url, externals);
            if visit.has_externals() {
                style(text).red().to_string()
            } else {
                style(text).green().to_string()
            }
        } else {
            let text = format!(
                "url: {}\n\tstatus: {}\n\tstatus text: {}\n\treferer: {}{}",
                visit.url, visit.outcome.status, visit.outcome.status_text, visit.referer, externals
            );
            style(text).red().to_string()
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, visit: &VisitReport<'_>) {
        if visit.is_suppressed() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", Self::render(visit)) {
            warn!(url = visit.url, error = %e, "failed to write report");
        }
    }
}

fn render_externals(externals: Option<&[ExternalResource]>) -> String {
    let Some(externals) = externals.filter(|e| !e.is_empty()) else {
        return String::new();
    };

    let entries: Vec<String> = externals
        .iter()
        .map(|r| format!("\t\ttag name: {}\n\t\treference url: {}", r.tag_kind, r.target_url))
        .collect();
    format!("\n\texternal resources:\n{}", entries.join("\n"))
}

/// One JSON object per reported visit.
pub struct JsonReporter<W: Write> {
    out: W,
}

#[derive(Serialize)]
struct JsonVisit<'a> {
    url: &'a str,
    referer: &'a str,
    status: u16,
    status_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_resources: Option<&'a [ExternalResource]>,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, visit: &VisitReport<'_>) {
        if visit.is_suppressed() {
            return;
        }
        let record = JsonVisit {
            url: visit.url,
            referer: visit.referer,
            status: visit.outcome.status,
            status_text: &visit.outcome.status_text,
            external_resources: visit.externals,
        };
        let written = serde_json::to_writer(&mut self.out, &record)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(e) = written {
            warn!(url = visit.url, error = %e, "failed to write report");
        }
    }
}

/// Lets callers pick a renderer at runtime.
impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report(&mut self, visit: &VisitReport<'_>) {
        (**self).report(visit)
    }
}
