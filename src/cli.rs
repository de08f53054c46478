//! Command-line interface.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CrawlConfig;

#[derive(Parser)]
#[command(name = "fgrab")]
#[command(about = "Incremental forum thread crawler and archiver")]
#[command(version)]
pub struct Cli {
    /// Directory where crawled threads are stored
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Forum root URL (scheme + host, no trailing slash)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Forum listing URL to discover threads from
    #[arg(long, global = true)]
    forum_url: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Maximum pages fetched per thread
    #[arg(long, global = true)]
    max_pages: Option<usize>,

    /// User-agent header sent with every request
    #[arg(long, global = true)]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Discover threads from the forum listing and crawl them all
    Crawl,

    /// Crawl a single thread
    Thread {
        /// Thread URL (or set FORUMGRAB_THREAD_URL)
        #[arg(env = "FORUMGRAB_THREAD_URL")]
        url: String,
    },

    /// Build the threads.json summary manifest
    Index,

    /// Verify saved page titles against their page numbers
    Verify,
}

impl Cli {
    fn into_parts(self) -> (CrawlConfig, Commands) {
        let mut config = CrawlConfig {
            data_dir: self.data_dir,
            ..CrawlConfig::default()
        };
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(forum_url) = self.forum_url {
            config.forum_url = forum_url;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.request_delay = std::time::Duration::from_millis(delay_ms);
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages_per_thread = max_pages;
        }
        if let Some(user_agent) = self.user_agent {
            config.user_agent = user_agent;
        }
        (config, self.command)
    }
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, command) = cli.into_parts();

    match command {
        Commands::Crawl => commands::cmd_crawl(&config).await,
        Commands::Thread { url } => commands::cmd_thread(&config, &url).await,
        Commands::Index => commands::cmd_index(&config),
        Commands::Verify => commands::cmd_verify(&config),
    }
}
