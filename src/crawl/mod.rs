// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Stops as soon as the target word is found on a page
// - Page budget (max_pages) so the crawl always terminates
// - Optional dedupe so cyclic sites aren't crawled over and over
// - Optional worker mode that fetches a few pages at once
//
// Submodules:
// - queue: The frontier (URLs waiting to be visited)
// - spider: The crawl loop and its report types
// =============================================================================

mod queue;
mod spider;

// Re-export the crawl engine and its results
pub use spider::{CrawlConfig, CrawlEvent, CrawlOutcome, Spider, VisitStatus};
