//! Error taxonomy for crawl operations.

use std::fmt;

use thiserror::Error;

/// Errors that abort the current crawl unit.
///
/// Non-success HTTP statuses and title-verification mismatches are not
/// errors at this level; they end a thread's pagination and surface as a
/// [`StopReason`] instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("not a thread URL: {0}")]
    BadThreadUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a thread's pagination loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The configured per-thread page cap was hit.
    MaxPagesReached,
    /// The page's normalized content matched its immediate predecessor.
    DuplicateTail,
    /// Non-success HTTP status; nothing further is fetched for this thread.
    HttpError(u16),
    /// The page's embedded page marker disagreed with the requested number.
    VerificationFailed(String),
    /// The body carried the forum's end-of-pages marker.
    NoMoreContent,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxPagesReached => write!(f, "max_pages_reached"),
            StopReason::DuplicateTail => write!(f, "duplicate_tail"),
            StopReason::HttpError(status) => write!(f, "http_error({status})"),
            StopReason::VerificationFailed(reason) => {
                write!(f, "verification_failed: {reason}")
            }
            StopReason::NoMoreContent => write!(f, "no_more_content"),
        }
    }
}
