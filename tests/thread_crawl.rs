//! Thread crawl controller behavior: resume, duplicate-tail detection,
//! page cap, and stop handling.

mod common;

use std::fs;

use tempfile::tempdir;

use common::{test_config, thread_page, ScriptedFetcher};
use forumgrab::crawler::ThreadCrawler;
use forumgrab::error::{CrawlError, StopReason};
use forumgrab::fetch::FetchOutcome;

const THREAD_URL: &str = "https://forum.test/threads/some-thread.123/";

#[tokio::test]
async fn duplicate_tail_stops_before_persisting() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let page2 = thread_page("Some thread", 2, "second page posts");
    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first page posts")),
        FetchOutcome::Success(page2.clone()),
        // Past-the-end request re-serves page 2 verbatim
        FetchOutcome::Success(page2),
    ]);

    let summary = ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(summary.stop, StopReason::DuplicateTail);
    assert_eq!(summary.fetched, 2);

    let thread_dir = data.path().join("some-thread.123");
    assert!(thread_dir.join("page1.html").exists());
    assert!(thread_dir.join("page2.html").exists());
    assert!(!thread_dir.join("page3.html").exists());
    assert!(thread_dir.join("updated.txt").exists());
}

#[tokio::test]
async fn duplicate_tail_ignores_volatile_tokens() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let page2 = thread_page("Some thread", 2, "second page posts");
    // Same logical content, different CSRF token
    let page2_refetched = page2.replace(
        "<body>",
        "<body><form data-csrf=\"fresh-token\"></form>",
    );
    let page2 = page2.replace("<body>", "<body><form data-csrf=\"old-token\"></form>");

    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first page posts")),
        FetchOutcome::Success(page2),
        FetchOutcome::Success(page2_refetched),
    ]);

    let summary = ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(summary.stop, StopReason::DuplicateTail);
    assert_eq!(summary.fetched, 2);
}

#[tokio::test]
async fn rerun_after_capped_crawl_issues_no_fetches() {
    let data = tempdir().unwrap();
    let mut config = test_config(data.path());
    config.max_pages_per_thread = 3;

    let pages: Vec<FetchOutcome> = (1..=3)
        .map(|n| FetchOutcome::Success(thread_page("Some thread", n, &format!("posts {n}"))))
        .collect();

    let fetcher = ScriptedFetcher::new(pages);
    let first = ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();
    assert_eq!(first.stop, StopReason::MaxPagesReached);
    assert_eq!(first.fetched, 3);

    let thread_dir = data.path().join("some-thread.123");
    let saved_page2 = fs::read_to_string(thread_dir.join("page2.html")).unwrap();

    // Unchanged source, empty script: any fetch would panic
    let refetcher = ScriptedFetcher::new(vec![]);
    let second = ThreadCrawler::new(&config, &refetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(refetcher.request_count(), 0);
    assert_eq!(second.fetched, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(second.stop, StopReason::MaxPagesReached);
    assert_eq!(
        fs::read_to_string(thread_dir.join("page2.html")).unwrap(),
        saved_page2
    );
}

#[tokio::test]
async fn resume_skips_existing_pages_without_fetching() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let page2 = thread_page("Some thread", 2, "second page posts");
    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first page posts")),
        FetchOutcome::Success(page2.clone()),
        FetchOutcome::Success(page2.clone()),
    ]);
    ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    // Second pass over an unchanged source: pages 1 and 2 are skipped, only
    // the tail probe for page 3 goes out, and it hits the duplicate check
    // against the fingerprint recovered from disk.
    let refetcher = ScriptedFetcher::new(vec![FetchOutcome::Success(page2)]);
    let summary = ThreadCrawler::new(&config, &refetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(refetcher.request_count(), 1);
    assert_eq!(
        refetcher.requests(),
        vec![format!("{THREAD_URL}page-3")]
    );
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.fetched, 0);
    assert_eq!(summary.stop, StopReason::DuplicateTail);
    assert!(!data.path().join("some-thread.123/page3.html").exists());
}

#[tokio::test]
async fn max_pages_bounds_the_crawl() {
    let data = tempdir().unwrap();
    let mut config = test_config(data.path());
    config.max_pages_per_thread = 4;

    // A source that never duplicates or fails
    let pages: Vec<FetchOutcome> = (1..=4)
        .map(|n| FetchOutcome::Success(thread_page("Some thread", n, &format!("posts {n}"))))
        .collect();

    let fetcher = ScriptedFetcher::new(pages);
    let summary = ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(fetcher.request_count(), 4);
    assert_eq!(summary.fetched, 4);
    assert_eq!(summary.stop, StopReason::MaxPagesReached);
}

#[tokio::test]
async fn page_urls_follow_pagination_convention() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first")),
        FetchOutcome::Success(thread_page("Some thread", 2, "second")),
        FetchOutcome::TerminalFailure(404),
    ]);
    ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(
        fetcher.requests(),
        vec![
            THREAD_URL.to_string(),
            format!("{THREAD_URL}page-2"),
            format!("{THREAD_URL}page-3"),
        ]
    );
}

#[tokio::test]
async fn thread_url_without_trailing_slash_paginates_correctly() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first")),
        FetchOutcome::Success(thread_page("Some thread", 2, "second")),
        FetchOutcome::TerminalFailure(404),
    ]);
    let summary = ThreadCrawler::new(&config, &fetcher)
        .crawl("https://forum.test/threads/some-thread.123")
        .await
        .unwrap();

    assert_eq!(summary.slug, "some-thread.123");
    assert_eq!(
        fetcher.requests(),
        vec![
            THREAD_URL.to_string(),
            format!("{THREAD_URL}page-2"),
            format!("{THREAD_URL}page-3"),
        ]
    );
}

#[tokio::test]
async fn http_error_stops_thread_but_keeps_progress() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first page posts")),
        FetchOutcome::TerminalFailure(500),
    ]);

    let summary = ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(summary.stop, StopReason::HttpError(500));
    assert_eq!(summary.fetched, 1);

    let thread_dir = data.path().join("some-thread.123");
    assert!(thread_dir.join("page1.html").exists());
    // The pass still completed, so the marker is written
    assert!(thread_dir.join("updated.txt").exists());
}

#[tokio::test]
async fn no_more_content_marker_stops_thread() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first page posts")),
        FetchOutcome::NoMoreContent,
    ]);

    let summary = ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert_eq!(summary.stop, StopReason::NoMoreContent);
    assert_eq!(summary.fetched, 1);
}

#[tokio::test]
async fn title_mismatch_stops_without_persisting() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());

    let fetcher = ScriptedFetcher::new(vec![
        FetchOutcome::Success(thread_page("Some thread", 1, "first page posts")),
        // Served as page 2 but titled as page 5
        FetchOutcome::Success(thread_page("Some thread", 5, "stray posts")),
    ]);

    let summary = ThreadCrawler::new(&config, &fetcher)
        .crawl(THREAD_URL)
        .await
        .unwrap();

    assert!(matches!(summary.stop, StopReason::VerificationFailed(_)));
    assert!(!data.path().join("some-thread.123/page2.html").exists());
}

#[tokio::test]
async fn non_thread_url_is_rejected() {
    let data = tempdir().unwrap();
    let config = test_config(data.path());
    let fetcher = ScriptedFetcher::new(vec![]);

    let err = ThreadCrawler::new(&config, &fetcher)
        .crawl("https://forum.test/forums/general.81/")
        .await
        .unwrap_err();

    assert!(matches!(err, CrawlError::BadThreadUrl(_)));
    assert_eq!(fetcher.request_count(), 0);
}
