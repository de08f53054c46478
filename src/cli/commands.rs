//! CLI command implementations.

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::CrawlConfig;
use crate::crawler::{ListingWalker, ThreadCrawler};
use crate::fetch::HttpFetcher;
use crate::{index, verify};

/// Discover the frontier from the forum listing, then crawl every thread.
pub async fn cmd_crawl(config: &CrawlConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;

    let fetcher = HttpFetcher::new(config);

    let frontier = ListingWalker::new(config, &fetcher).walk().await?;
    println!("Found {} threads", frontier.len());

    let pb = ProgressBar::new(frontier.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let crawler = ThreadCrawler::new(config, &fetcher);
    for link in &frontier {
        pb.set_message(link.title.clone());
        match crawler.crawl(&link.url).await {
            Ok(summary) => info!(
                slug = %summary.slug,
                fetched = summary.fetched,
                skipped = summary.skipped,
                stop = %summary.stop,
                "thread crawled"
            ),
            // One bad thread should not end the whole run
            Err(err) => warn!(url = %link.url, error = %err, "thread crawl failed"),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "Crawled {} threads into {}",
        frontier.len(),
        config.data_dir.display()
    );
    Ok(())
}

/// Crawl a single thread by URL.
pub async fn cmd_thread(config: &CrawlConfig, url: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;

    let fetcher = HttpFetcher::new(config);
    let summary = ThreadCrawler::new(config, &fetcher).crawl(url).await?;

    println!(
        "{}: {} fetched, {} skipped ({})",
        summary.slug, summary.fetched, summary.skipped, summary.stop
    );
    Ok(())
}

/// Build the threads.json manifest from the on-disk corpus.
pub fn cmd_index(config: &CrawlConfig) -> anyhow::Result<()> {
    let entries = index::build_entries(config)
        .with_context(|| format!("scanning {}", config.data_dir.display()))?;
    let path = index::write_manifest(&config.data_dir, &entries)?;

    println!("Wrote {} with {} threads", path.display(), entries.len());
    Ok(())
}

/// Check every saved page's title against its filename's page number.
pub fn cmd_verify(config: &CrawlConfig) -> anyhow::Result<()> {
    let issues = verify::verify_corpus(&config.data_dir)
        .with_context(|| format!("scanning {}", config.data_dir.display()))?;

    if issues.is_empty() {
        println!("All pages carry the expected page markers.");
        return Ok(());
    }

    for issue in &issues {
        eprintln!("{}: {}", issue.path.display(), issue.message);
    }
    anyhow::bail!("{} pages failed verification", issues.len())
}
