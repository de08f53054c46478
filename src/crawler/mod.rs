//! Crawl controllers: per-thread pagination and forum listing traversal.

pub mod listing;
pub mod thread;

pub use listing::{ListingWalker, ThreadLink};
pub use thread::{thread_slug, ThreadCrawlSummary, ThreadCrawler};
