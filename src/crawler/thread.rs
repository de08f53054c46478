//! Per-thread pagination controller.
//!
//! Drives the fetch -> normalize -> compare-to-previous -> verify ->
//! persist-or-stop loop for one thread. Termination is guaranteed by the
//! max-pages cap even if duplicate and error detection never fire.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};
use url::Url;

use crate::config::CrawlConfig;
use crate::error::{CrawlError, StopReason};
use crate::fetch::{FetchOutcome, PageFetch};
use crate::fingerprint::fingerprint;
use crate::normalize::normalize;
use crate::storage;
use crate::verify::check_page_title;

static THREAD_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/threads/(.+?\.\d+)").unwrap());

/// Extract the stable thread slug from a thread URL.
///
/// XenForo thread URLs embed `<slug>.<numeric id>` after `/threads/`; the
/// combination is unique per thread and doubles as the folder name.
pub fn thread_slug(url: &str) -> Option<&str> {
    THREAD_SLUG
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Parse a thread URL and ensure its path ends with a slash, so pagination
/// segments can be appended without clobbering the last path component.
fn pagination_base(url: &str) -> Result<Url, CrawlError> {
    let mut base = Url::parse(url).map_err(|_| CrawlError::BadThreadUrl(url.to_string()))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Outcome of one crawl pass over a thread.
#[derive(Debug)]
pub struct ThreadCrawlSummary {
    pub slug: String,
    /// Pages downloaded and persisted this pass.
    pub fetched: usize,
    /// Pages already on disk, skipped without a request.
    pub skipped: usize,
    pub stop: StopReason,
}

/// Crawls one thread at a time, resuming from whatever is already on disk.
///
/// Existing page files are skipped, not re-fetched (cheap resume). A skipped
/// page is read back and fingerprinted so duplicate-tail comparison still
/// sees the fingerprint of page N-1 after a resume.
pub struct ThreadCrawler<'a, F> {
    config: &'a CrawlConfig,
    fetcher: &'a F,
}

impl<'a, F: PageFetch> ThreadCrawler<'a, F> {
    pub fn new(config: &'a CrawlConfig, fetcher: &'a F) -> Self {
        Self { config, fetcher }
    }

    /// Crawl a thread's pages in order, starting at 1, until a stop
    /// condition fires or the page cap is reached.
    ///
    /// Page N+1 is never fetched before page N exists on disk. Whatever
    /// stops the loop, a fresh `updated.txt` marker records that this pass
    /// completed.
    pub async fn crawl(&self, url: &str) -> Result<ThreadCrawlSummary, CrawlError> {
        let slug = thread_slug(url)
            .ok_or_else(|| CrawlError::BadThreadUrl(url.to_string()))?
            .to_string();
        let base = pagination_base(url)?;

        let thread_dir = storage::thread_dir(&self.config.data_dir, &slug);
        fs::create_dir_all(&thread_dir)?;

        let mut previous_fingerprint: Option<String> = None;
        let mut fetched = 0;
        let mut skipped = 0;
        let mut stop = StopReason::MaxPagesReached;

        for page in 1..=self.config.max_pages_per_thread {
            let page_url = if page == 1 {
                base.to_string()
            } else {
                format!("{base}page-{page}")
            };
            let page_path = storage::page_path(&thread_dir, page);

            if page_path.exists() {
                // Resume: keep the fingerprint chain intact without a request
                let raw = fs::read_to_string(&page_path)?;
                previous_fingerprint = Some(fingerprint(&normalize(&raw)));
                skipped += 1;
                info!(slug = %slug, page, "page already on disk, skipping");
                continue;
            }

            match self.fetcher.fetch(&page_url).await? {
                FetchOutcome::TerminalFailure(status) => {
                    warn!(slug = %slug, page, status, "fetch failed, stopping thread");
                    stop = StopReason::HttpError(status);
                    break;
                }
                FetchOutcome::NoMoreContent => {
                    info!(slug = %slug, page, "no more pages");
                    stop = StopReason::NoMoreContent;
                    break;
                }
                FetchOutcome::Success(raw) => {
                    // Duplicate tail is checked before title verification: a
                    // past-the-end request re-serves the last page, which
                    // still carries the previous page's title marker and is
                    // the normal end-of-thread signal, not an anomaly.
                    let current = fingerprint(&normalize(&raw));
                    if previous_fingerprint.as_deref() == Some(current.as_str()) {
                        info!(slug = %slug, page, "duplicate of previous page, stopping");
                        stop = StopReason::DuplicateTail;
                        break;
                    }

                    if let Err(reason) = check_page_title(&raw, page) {
                        warn!(slug = %slug, page, reason = %reason, "title verification failed");
                        stop = StopReason::VerificationFailed(reason);
                        break;
                    }

                    fs::write(&page_path, &raw)?;
                    previous_fingerprint = Some(current);
                    fetched += 1;
                    info!(slug = %slug, page, "page saved");
                }
            }
        }

        storage::write_updated_marker(&thread_dir)?;

        Ok(ThreadCrawlSummary {
            slug,
            fetched,
            skipped,
            stop,
        })
    }
}
