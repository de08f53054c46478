//! Volatile-token scrubbing for fetched markup.
//!
//! Two fetches of logically identical forum pages differ in per-request
//! noise: CSRF attributes, anti-forgery form values, inline-script token and
//! timestamp assignments, and session-scoped lightbox DOM ids. Stripping
//! that noise before hashing is what makes fingerprint comparison usable for
//! duplicate-page detection.

use std::sync::LazyLock;

use regex::Regex;

/// Substitution rules applied independently to every line.
///
/// The patterns target disjoint substrings, so their order on a single line
/// does not matter; the list is ordered anyway to keep the rule set
/// reviewable as data.
static VOLATILE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // XenForo CSRF token attribute
        (Regex::new(r#"data-csrf="[^"]+""#).unwrap(), ""),
        // Anti-forgery form field value
        (Regex::new(r#"name="_xfToken" value="[^"]+""#).unwrap(), ""),
        // Inline-script token assignment
        (Regex::new(r"csrf: '[^']+'").unwrap(), ""),
        // Request-relative timestamp assignment
        (Regex::new(r"now: \d+").unwrap(), ""),
        // Session-scoped lightbox/gallery DOM ids
        (Regex::new(r#"data-lb-trigger="[^"]*?_xfUid[^"]*""#).unwrap(), ""),
        (Regex::new(r#"data-lb-id="[^"]*?_xfUid[^"]*""#).unwrap(), ""),
        (Regex::new(r#"js-lbImage-_xfUid[^"\s>]*"#).unwrap(), ""),
        (Regex::new(r"_xfUid-\d+-\d+").unwrap(), ""),
    ]
});

/// Strip volatile, session/request-scoped substrings from raw markup.
///
/// Pure and deterministic: no I/O, no randomness. Lines are trimmed after
/// substitution; lines without volatile tokens pass through otherwise
/// unchanged. Post bodies and page-number banners are never touched.
pub fn normalize(raw: &str) -> String {
    let mut lines = Vec::new();
    for line in raw.lines() {
        let mut line = line.to_string();
        for (pattern, replacement) in VOLATILE_PATTERNS.iter() {
            line = pattern.replace_all(&line, *replacement).into_owned();
        }
        lines.push(line.trim().to_string());
    }
    lines.join("\n")
}
