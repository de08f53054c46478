//! Crawl configuration.
//!
//! All tunables live in one immutable struct handed to each component
//! constructor, so tests can inject a zero delay and small page caps.

use std::path::PathBuf;
use std::time::Duration;

/// Default forum root (scheme + host, no trailing slash).
pub const DEFAULT_BASE_URL: &str = "https://www.rollspel.nu";

/// Default forum listing to discover threads from.
pub const DEFAULT_FORUM_URL: &str = "https://www.rollspel.nu/forums/varulvsspel.81/";

/// Identifying client marker sent with every request.
pub const DEFAULT_USER_AGENT: &str = "forumgrab/0.3 (archival bot; identified on the forum)";

/// Hard cap on pages fetched per thread.
pub const DEFAULT_MAX_PAGES_PER_THREAD: usize = 50;

/// Politeness delay applied after every request.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 2000;

/// Phrase the forum renders on a paginated URL past the last page.
pub const DEFAULT_NO_MORE_PAGES_MARKER: &str = "Det finns inga fler sidor";

/// Immutable crawl configuration passed into each component constructor.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Forum root URL, prepended to relative thread hrefs.
    pub base_url: String,
    /// Forum listing URL whose pages are walked for thread discovery.
    pub forum_url: String,
    /// Root of the on-disk corpus.
    pub data_dir: PathBuf,
    /// User-agent header for every request.
    pub user_agent: String,
    /// Hard cap on pages fetched per thread; bounds the crawl loop even if
    /// duplicate or error detection never fires.
    pub max_pages_per_thread: usize,
    /// Unconditional sleep after every request.
    pub request_delay: Duration,
    /// Body phrase that classifies a fetch as past-the-end.
    pub no_more_pages_marker: String,
    /// Category prefixes stripped from thread titles when indexing.
    pub title_prefixes: Vec<String>,
    /// Trailing site-name segment stripped from thread titles when indexing.
    pub title_suffix: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            forum_url: DEFAULT_FORUM_URL.to_string(),
            data_dir: PathBuf::from("data"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_pages_per_thread: DEFAULT_MAX_PAGES_PER_THREAD,
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            no_more_pages_marker: DEFAULT_NO_MORE_PAGES_MARKER.to_string(),
            title_prefixes: vec!["Nekromanti - ".to_string(), "Varulv - ".to_string()],
            title_suffix: "| rollspel.nu".to_string(),
        }
    }
}
