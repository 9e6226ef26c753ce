// src/crawl/spider.rs
// =============================================================================
// This module is the crawl engine: it walks the web breadth-first looking for
// a word.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Pop the next URL and fetch it (counts as one visit, even if it fails)
// 3. If the page is HTML and contains the word, stop: we found it
// 4. Otherwise extract its links and append them to the frontier
// 5. Repeat until the word is found, the frontier is empty, or the page
//    budget (max_pages) is used up
//
// A failed fetch never stops the crawl. It is reported and we move on to the
// next URL.
//
// Worker mode:
// - With workers > 1 we pop a small batch of URLs and fetch them at the same
//   time, then handle the results in frontier order as if they had been
//   fetched one by one. Pages after a hit in the same batch are thrown away.
//
// Progress:
// - The caller hears about a URL twice: Visiting right before its fetch
//   starts, and Visited once the result is known
// - In worker mode the whole batch is announced up front, so a page thrown
//   away after a hit gets a Visiting event but no Visited event
//
// Rust concepts:
// - Closures: The caller passes a callback to watch each visit as it happens
// - Streams: futures' buffered() runs a batch of fetches concurrently but
//   yields results in their original order
// =============================================================================

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use super::queue::Frontier;
use crate::page::{extract_links, FetchError, FetchedPage, PageFetcher};

/// Crawl options that don't change per run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Never queue a URL twice (see queue.rs)
    pub dedupe: bool,
    /// How many pages to fetch at the same time (1 = strictly sequential)
    pub workers: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            dedupe: false,
            workers: 1,
        }
    }
}

/// How a crawl ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// The word was found on this page
    Found { url: String },
    /// Budget used up or nothing left to visit
    NotFound,
}

/// What happened when we visited one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VisitStatus {
    /// Fetched without finding the word; `links` is how many were extracted
    Fetched { html: bool, links: usize },
    /// Fetched and the word is on this page
    Matched,
    /// The page could not be fetched or decoded
    Failed { reason: String },
}

/// One entry of the crawl log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// 1-based visit counter
    pub number: usize,
    pub url: String,
    #[serde(flatten)]
    pub status: VisitStatus,
}

/// Progress notifications passed to the `run_with_progress` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlEvent<'a> {
    /// About to fetch `url` as visit number `number`
    Visiting { number: usize, url: &'a str },
    /// The visit is finished
    Visited(&'a Visit),
}

/// Full result of a crawl: the outcome plus every visit in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    #[serde(flatten)]
    pub outcome: CrawlOutcome,
    pub pages_visited: usize,
    pub visits: Vec<Visit>,
}

// Per-page working data, dropped at the end of each iteration
#[derive(Debug, Default)]
struct PageResult {
    body_text: String,
    links: Vec<String>,
    is_html: bool,
}

impl PageResult {
    // Non-HTML pages are treated as empty: no text, no links
    fn from_fetched(page: FetchedPage) -> Result<Self, FetchError> {
        if !page.is_html() {
            return Ok(Self::default());
        }

        Ok(Self {
            body_text: page.text()?,
            links: Vec::new(),
            is_html: true,
        })
    }

    // Case-sensitive substring match, only for HTML pages
    fn contains(&self, word: &str) -> bool {
        self.is_html && self.body_text.contains(word)
    }
}

/// The crawl engine.
///
/// Holds the HTTP fetcher and the options; all per-crawl state (frontier,
/// visit counter) lives inside a single call to [`Spider::run_with_progress`].
pub struct Spider {
    fetcher: PageFetcher,
    config: CrawlConfig,
}

impl Spider {
    pub fn new(fetcher: PageFetcher, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    /// Crawls from `seed_url` until `target_word` is found or `max_pages`
    /// URLs have been visited.
    pub async fn spider(
        &self,
        seed_url: &str,
        target_word: &str,
        max_pages: usize,
    ) -> CrawlOutcome {
        self.run_with_progress(seed_url, target_word, max_pages, |_| {})
            .await
            .outcome
    }

    /// Same as [`Spider::spider`], but reports progress through `on_event`
    /// and returns the full report.
    pub async fn run_with_progress<F>(
        &self,
        seed_url: &str,
        target_word: &str,
        max_pages: usize,
        mut on_event: F,
    ) -> CrawlReport
    where
        F: FnMut(CrawlEvent<'_>),
    {
        let workers = self.config.workers.max(1);
        let mut frontier = Frontier::new(seed_url, self.config.dedupe);
        let mut visits: Vec<Visit> = Vec::new();

        tracing::info!(
            "Starting crawl from {} (word: {:?}, max_pages: {}, dedupe: {}, workers: {})",
            seed_url,
            target_word,
            max_pages,
            self.config.dedupe,
            workers
        );

        while visits.len() < max_pages && !frontier.is_empty() {
            // Never pop more URLs than the budget has room for
            let batch_size = workers.min(max_pages - visits.len());
            let batch: Vec<String> = std::iter::from_fn(|| frontier.pop())
                .take(batch_size)
                .collect();

            for (offset, url) in batch.iter().enumerate() {
                on_event(CrawlEvent::Visiting {
                    number: visits.len() + offset + 1,
                    url,
                });
            }

            let fetcher = &self.fetcher;
            let fetched: Vec<(String, Result<FetchedPage, FetchError>)> = stream::iter(batch)
                .map(move |url| async move {
                    let result = fetcher.fetch(&url).await;
                    (url, result)
                })
                .buffered(workers)
                .collect()
                .await;

            for (url, result) in fetched {
                let status = match result.and_then(PageResult::from_fetched) {
                    Ok(page) if page.contains(target_word) => VisitStatus::Matched,
                    Ok(mut page) => {
                        if page.is_html {
                            page.links = extract_links(&page.body_text, &url);
                        }
                        let links = page.links.len();
                        let queued = frontier.extend(page.links);
                        tracing::debug!("{}: {} links, {} queued", url, links, queued);

                        VisitStatus::Fetched {
                            html: page.is_html,
                            links,
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch {}: {}", url, e);
                        VisitStatus::Failed {
                            reason: e.to_string(),
                        }
                    }
                };

                let visit = Visit {
                    number: visits.len() + 1,
                    url,
                    status,
                };
                on_event(CrawlEvent::Visited(&visit));

                let found = visit.status == VisitStatus::Matched;
                let url = visit.url.clone();
                visits.push(visit);

                if found {
                    tracing::info!(
                        "Found {:?} at {} after {} page(s)",
                        target_word,
                        url,
                        visits.len()
                    );
                    return CrawlReport {
                        outcome: CrawlOutcome::Found { url },
                        pages_visited: visits.len(),
                        visits,
                    };
                }
            }
        }

        tracing::info!("Word {:?} not found after {} page(s)", target_word, visits.len());

        CrawlReport {
            outcome: CrawlOutcome::NotFound,
            pages_visited: visits.len(),
            visits,
        }
    }
}
