// src/extract/script.rs
// =============================================================================
// Finds absolute URL literals inside inline <script> bodies.
//
// This is a heuristic: it matches anything URL-shaped, so it over-reports
// URLs sitting in comments or unrelated strings, and it cannot see URLs that
// the script builds at runtime.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

// Stops at whitespace, quotes, backticks, angle brackets, parentheses and
// backslashes, which cover the usual string and markup delimiters.
static RE_URL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'`<>()\\]+"#).unwrap()
});

/// Returns every absolute http(s) URL literal in `source`, in order of
/// appearance. Trailing punctuation picked up from the surrounding code
/// (`,` `;` `.` `}` `]`) is trimmed.
pub fn find_url_literals(source: &str) -> Vec<&str> {
    RE_URL_LITERAL
        .find_iter(source)
        .map(|m| m.as_str().trim_end_matches([',', ';', '.', '}', ']']))
        .filter(|candidate| candidate.len() > "https://".len())
        .collect()
}
