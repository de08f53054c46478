//! Page-number verification.
//!
//! XenForo embeds `| Page N |` in the `<title>` of every paginated page
//! except the first. Checking that marker against the requested page number
//! catches fetch sequencing bugs and site-side anomalies, both during a
//! crawl and in an offline pass over the saved corpus.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::utils::html::extract_title;

static PAGE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|\s*Page\s+\d+\s*\|").unwrap());

static PAGE_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^page(\d+)\.html$").unwrap());

/// Check a page's `<title>` against the page number it was requested as.
///
/// Page 1 must not carry a `| Page N |` segment; page N > 1 must carry
/// exactly `| Page N |`.
pub fn check_page_title(html: &str, page: usize) -> Result<(), String> {
    let Some(title) = extract_title(html) else {
        return Err("page has no <title>".to_string());
    };
    let expected = format!("| Page {page} |");

    if page == 1 && PAGE_SEGMENT.is_match(&title) {
        Err(format!("page 1 carries a page marker in its title: {title}"))
    } else if page > 1 && !title.contains(&expected) {
        Err(format!("expected '{expected}' in title: {title}"))
    } else {
        Ok(())
    }
}

/// A saved page whose title disagrees with its filename.
#[derive(Debug)]
pub struct VerificationIssue {
    pub path: PathBuf,
    pub message: String,
}

/// Check every saved `page<N>.html` in the corpus against its page number.
pub fn verify_corpus(data_dir: &Path) -> std::io::Result<Vec<VerificationIssue>> {
    let mut issues = Vec::new();

    let mut thread_dirs: Vec<PathBuf> = fs::read_dir(data_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    thread_dirs.sort();

    for thread_dir in thread_dirs {
        debug!(dir = %thread_dir.display(), "verifying thread folder");

        let mut pages: Vec<(usize, PathBuf)> = fs::read_dir(&thread_dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name();
                let number = PAGE_FILE
                    .captures(&name.to_string_lossy())
                    .and_then(|c| c.get(1))
                    .and_then(|m| m.as_str().parse().ok())?;
                Some((number, entry.path()))
            })
            .collect();
        pages.sort();

        for (number, path) in pages {
            let html = fs::read_to_string(&path)?;
            if let Err(message) = check_page_title(&html, number) {
                issues.push(VerificationIssue { path, message });
            }
        }
    }

    Ok(issues)
}
