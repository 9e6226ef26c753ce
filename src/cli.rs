// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is no config file: everything the crawler can be told comes from
// these arguments, and the helper methods at the bottom turn them into the
// config structs the fetcher and crawl engine expect.
//
// Rust concepts:
// - Derive macros: clap generates the parsing code from the struct
// - Value parsers: Reject bad input (like an empty word) before we start
// =============================================================================

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::time::Duration;

use crate::crawl::CrawlConfig;
use crate::page::FetchConfig;

#[derive(Parser, Debug)]
#[command(
    name = "word-spider",
    version,
    about = "Crawl the web breadth-first from a URL until a word is found",
    long_about = "word-spider starts at a seed URL, follows every link it finds, and searches each \
                  HTML page for a word (exact, case-sensitive). It stops at the first page that \
                  contains the word or when the page budget runs out.\n\n\
                  Exits with 0 whenever the crawl runs, found or not, and with 2 on usage or \
                  startup errors."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Word to search for (case-sensitive substring match)
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub word: String,

    /// Maximum number of pages to visit, failed fetches included
    #[arg(long, default_value_t = 100)]
    pub max_pages: usize,

    /// Never queue the same URL twice
    ///
    /// Without this flag every discovered link is queued, so pages that link
    /// to each other are visited again and again until the budget runs out.
    #[arg(long)]
    pub dedupe: bool,

    /// Number of pages to fetch at the same time (1 = one after another)
    #[arg(long, default_value_t = 1)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Maximum number of redirects to follow per request
    #[arg(long, default_value_t = 5)]
    pub max_redirects: usize,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Output results in JSON format instead of text
    #[arg(long)]
    pub json: bool,

    /// Only print the final result, not every visited page
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig {
            timeout: Duration::from_secs(self.timeout),
            max_redirects: self.max_redirects,
            ..FetchConfig::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            dedupe: self.dedupe,
            workers: self.workers,
        }
    }
}
