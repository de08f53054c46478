//! Forum listing traversal and thread discovery.

use std::collections::HashSet;

use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::fetch::{FetchOutcome, PageFetch};

/// A discovered thread awaiting crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadLink {
    pub title: String,
    pub url: String,
}

/// Walks the forum listing's pages and collects the crawl frontier.
///
/// Traversal stops on the first listing page with no thread links, on a
/// fetch failure, or when a page yields the same URL set as its
/// predecessor (pagination wraparound).
pub struct ListingWalker<'a, F> {
    config: &'a CrawlConfig,
    fetcher: &'a F,
}

impl<'a, F: PageFetch> ListingWalker<'a, F> {
    pub fn new(config: &'a CrawlConfig, fetcher: &'a F) -> Self {
        Self { config, fetcher }
    }

    /// Walk listing pages and return the deduplicated frontier in
    /// first-seen order.
    ///
    /// Deduplication is by URL against everything seen in this traversal,
    /// so a thread reappearing pages later still contributes one entry,
    /// keeping its first-seen title.
    pub async fn walk(&self) -> Result<Vec<ThreadLink>, CrawlError> {
        let mut frontier = Vec::new();
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut previous_urls: HashSet<String> = HashSet::new();
        let mut page = 1;

        loop {
            let url = if page == 1 {
                self.config.forum_url.clone()
            } else {
                format!("{}page-{page}", self.config.forum_url)
            };
            info!(page, url = %url, "fetching listing page");

            let raw = match self.fetcher.fetch(&url).await? {
                FetchOutcome::Success(raw) => raw,
                FetchOutcome::TerminalFailure(status) => {
                    warn!(page, status, "listing fetch failed, stopping traversal");
                    break;
                }
                FetchOutcome::NoMoreContent => {
                    info!(page, "listing has no more pages");
                    break;
                }
            };

            let links = extract_thread_links(&raw, &self.config.base_url);
            if links.is_empty() {
                info!(page, "no thread links found, stopping traversal");
                break;
            }

            let current_urls: HashSet<String> =
                links.iter().map(|link| link.url.clone()).collect();
            if current_urls == previous_urls {
                info!(page, "same thread set as previous page, assuming last page");
                break;
            }

            for link in links {
                if seen_urls.insert(link.url.clone()) {
                    debug!(title = %link.title, url = %link.url, "discovered thread");
                    frontier.push(link);
                }
            }

            previous_urls = current_urls;
            page += 1;
        }

        Ok(frontier)
    }
}

/// Extract (title, absolute URL) thread links from a listing page.
fn extract_thread_links(html: &str, base_url: &str) -> Vec<ThreadLink> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("div.structItem-title a[href*='/threads/']").unwrap();

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        // Thread hrefs are site-relative and end in `.<numeric id>`
        if !href.starts_with("/threads/") || !href.contains('.') {
            continue;
        }
        let title = element.text().collect::<String>().trim().to_string();
        links.push(ThreadLink {
            title,
            url: format!("{base_url}{href}"),
        });
    }
    links
}
