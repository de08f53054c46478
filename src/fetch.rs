//! Page fetching with politeness throttling.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::CrawlConfig;
use crate::error::CrawlError;

/// Classification of a single page fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// HTTP 200; carries the raw markup.
    Success(String),
    /// Non-success HTTP status; the caller must stop paginating this unit.
    TerminalFailure(u16),
    /// The body carried the forum's end-of-pages marker.
    NoMoreContent,
}

/// Seam between the crawl controllers and the network.
///
/// Controllers are written against this trait so tests can drive them with
/// scripted outcomes instead of a live forum.
#[async_trait]
pub trait PageFetch {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, CrawlError>;
}

/// HTTP fetcher with a fixed identifying user-agent and an unconditional
/// politeness delay after every request.
///
/// The delay is a cooperative rate limit, not a retry/backoff mechanism; a
/// failed fetch is never retried.
pub struct HttpFetcher {
    client: reqwest::Client,
    request_delay: Duration,
    no_more_pages_marker: String,
}

impl HttpFetcher {
    /// Create a new fetcher from the crawl configuration.
    pub fn new(config: &CrawlConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            request_delay: config.request_delay,
            no_more_pages_marker: config.no_more_pages_marker.clone(),
        }
    }
}

#[async_trait]
impl PageFetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, CrawlError> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        let outcome = if status == reqwest::StatusCode::OK {
            let body = response.text().await?;
            if body.contains(&self.no_more_pages_marker) {
                FetchOutcome::NoMoreContent
            } else {
                FetchOutcome::Success(body)
            }
        } else {
            FetchOutcome::TerminalFailure(status.as_u16())
        };

        // One fixed sleep per request, success or not
        tokio::time::sleep(self.request_delay).await;

        Ok(outcome)
    }
}
