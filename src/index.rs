//! Summary manifest over the crawled corpus.
//!
//! A post-crawl pass: scans thread folders under the data root, pulls a
//! cleaned display title out of each thread's first page, counts saved
//! pages, and writes `threads.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CrawlConfig;
use crate::storage;
use crate::utils::html::extract_title;

/// One manifest row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    pub name: String,
    pub slug: String,
    pub pages: usize,
}

/// Strip configured category prefixes and the trailing site-name segment
/// from a raw `<title>` text.
pub fn clean_title(raw: &str, prefixes: &[String], suffix: &str) -> String {
    let mut title = raw.trim().to_string();
    for prefix in prefixes {
        if let Some(rest) = title.strip_prefix(prefix.as_str()) {
            title = rest.to_string();
        }
    }
    if title.contains(suffix) {
        title = title.replace(suffix, "").trim().to_string();
    }
    title
}

/// Scan the corpus and build manifest entries, sorted by slug.
///
/// Folders without a `page1.html` or without an extractable title are
/// skipped with a warning rather than aborting the pass.
pub fn build_entries(config: &CrawlConfig) -> std::io::Result<Vec<ThreadEntry>> {
    let mut slugs: Vec<String> = fs::read_dir(&config.data_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    slugs.sort();

    let mut entries = Vec::new();
    for slug in slugs {
        let thread_dir = storage::thread_dir(&config.data_dir, &slug);
        let first_page = storage::page_path(&thread_dir, 1);
        if !first_page.is_file() {
            warn!(slug = %slug, "thread folder has no page1.html, skipping");
            continue;
        }

        let html = fs::read_to_string(&first_page)?;
        let Some(raw_title) = extract_title(&html) else {
            warn!(slug = %slug, "page1.html has no <title>, skipping");
            continue;
        };

        let name = clean_title(&raw_title, &config.title_prefixes, &config.title_suffix);
        let pages = storage::count_pages(&thread_dir)?;
        debug!(slug = %slug, name = %name, pages, "indexed thread");
        entries.push(ThreadEntry { name, slug, pages });
    }

    Ok(entries)
}

/// Write the manifest as human-readable JSON under the data root.
pub fn write_manifest(data_dir: &Path, entries: &[ThreadEntry]) -> std::io::Result<PathBuf> {
    let path = data_dir.join("threads.json");
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(&path, json)?;
    Ok(path)
}
