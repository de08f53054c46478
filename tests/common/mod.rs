//! Shared test fixtures: a scripted fetcher and HTML builders.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use forumgrab::config::CrawlConfig;
use forumgrab::error::CrawlError;
use forumgrab::fetch::{FetchOutcome, PageFetch};

/// Replays scripted outcomes in order and records every requested URL.
pub struct ScriptedFetcher {
    outcomes: Mutex<VecDeque<FetchOutcome>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new(outcomes: Vec<FetchOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetch for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, CrawlError> {
        self.requests.lock().unwrap().push(url.to_string());
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("fetch issued after script was exhausted");
        Ok(outcome)
    }
}

/// Crawl configuration suitable for tests: no delay, small page cap.
pub fn test_config(data_dir: &Path) -> CrawlConfig {
    CrawlConfig {
        base_url: "https://forum.test".to_string(),
        forum_url: "https://forum.test/forums/general.81/".to_string(),
        data_dir: data_dir.to_path_buf(),
        request_delay: Duration::ZERO,
        max_pages_per_thread: 10,
        ..CrawlConfig::default()
    }
}

/// Build a thread page with the forum's title convention: page 1 has no
/// page marker, later pages carry `| Page N |`.
pub fn thread_page(thread_title: &str, page: usize, body: &str) -> String {
    let title = if page == 1 {
        format!("{thread_title} | rollspel.nu")
    } else {
        format!("{thread_title} | Page {page} | rollspel.nu")
    };
    format!(
        "<html><head><title>{title}</title></head>\
         <body><div class=\"message\">{body}</div></body></html>"
    )
}

/// Build a forum listing page from (title, href) pairs.
pub fn listing_page(threads: &[(&str, &str)]) -> String {
    let mut items = String::new();
    for (title, href) in threads {
        items.push_str(&format!(
            "<div class=\"structItem-title\"><a href=\"{href}\">{title}</a></div>"
        ));
    }
    format!("<html><head><title>General | rollspel.nu</title></head><body>{items}</body></html>")
}
