// src/page/mod.rs
// =============================================================================
// This module turns a URL into something the crawler can use.
//
// Submodules:
// - http: Fetches a URL and reports its content type and body bytes
// - html: Extracts absolute anchor links from an HTML page
//
// Neither submodule knows anything about the crawl itself. The crawl engine
// (src/crawl/) calls them and owns all the crawl state.
// =============================================================================

mod html;
mod http;

pub use html::extract_links;
pub use http::{FetchConfig, FetchError, FetchedPage, PageFetcher};
