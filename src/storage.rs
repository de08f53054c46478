//! On-disk layout for the crawled corpus.
//!
//! Each thread owns one folder under the data root:
//! `data/<thread-slug>/page<N>.html` (1-indexed raw markup) plus
//! `data/<thread-slug>/updated.txt`, the wall-clock timestamp of the last
//! completed crawl pass. Pages are never deleted by this system.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Filename of the per-thread crawl-pass timestamp marker.
pub const UPDATED_MARKER: &str = "updated.txt";

/// Timestamp format used in the marker file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Folder holding one thread's pages.
pub fn thread_dir(data_dir: &Path, slug: &str) -> PathBuf {
    data_dir.join(slug)
}

/// Path of page `number` inside a thread folder.
pub fn page_path(thread_dir: &Path, number: usize) -> PathBuf {
    thread_dir.join(format!("page{number}.html"))
}

/// Record the completion time of a crawl pass for a thread.
pub fn write_updated_marker(thread_dir: &Path) -> std::io::Result<()> {
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    fs::write(thread_dir.join(UPDATED_MARKER), stamp)
}

/// Count the `page<N>.html` files in a thread folder.
pub fn count_pages(thread_dir: &Path) -> std::io::Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(thread_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("page") && name.ends_with(".html") {
            count += 1;
        }
    }
    Ok(count)
}
