// src/crawl/queue.rs
// =============================================================================
// This module implements the crawl frontier: the queue of URLs still to visit.
//
// How it works:
// 1. The frontier starts with just the seed URL
// 2. The crawler pops URLs from the front (breadth-first order)
// 3. Links found on a page are pushed onto the back
//
// Two modes:
// - Plain (default): every discovered link is queued, even if we have
//   already queued or visited it. Cyclic sites will revisit pages until the
//   page budget runs out.
// - Dedupe: the frontier remembers every URL it has ever accepted and
//   refuses to queue it again. URLs are compared without their #fragment,
//   so "/docs" and "/docs#intro" are the same page.
//
// Rust concepts:
// - VecDeque: Double-ended queue for breadth-first crawling
// - HashSet: To remember which URLs we've seen (O(1) lookup)
// - Option<HashSet>: The set only exists when dedupe is switched on
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO queue of URLs awaiting a visit.
#[derive(Debug)]
pub struct Frontier {
    pending: VecDeque<String>,
    // None when dedupe is off
    seen: Option<HashSet<String>>,
}

impl Frontier {
    /// Creates a frontier holding only the seed URL
    pub fn new(seed_url: &str, dedupe: bool) -> Self {
        let mut frontier = Self {
            pending: VecDeque::new(),
            seen: dedupe.then(HashSet::new),
        };
        frontier.push(seed_url.to_string());
        frontier
    }

    /// Adds a URL to the back of the queue
    ///
    /// Returns false if dedupe is on and the URL was seen before.
    pub fn push(&mut self, url: String) -> bool {
        if let Some(seen) = self.seen.as_mut() {
            if !seen.insert(dedupe_key(&url)) {
                return false;
            }
        }

        self.pending.push_back(url);
        true
    }

    /// Adds all URLs in order, returning how many were actually queued
    pub fn extend<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut queued = 0;
        for url in urls {
            if self.push(url) {
                queued += 1;
            }
        }
        queued
    }

    /// Removes the URL at the front of the queue
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// Builds the comparison key used in dedupe mode
//
// Parsing normalizes the URL ("HTTP://Example.com" == "http://example.com/"),
// and the fragment is dropped because it never changes what the server sends.
// Strings that aren't valid URLs are compared as-is.
fn dedupe_key(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does dedupe.then(HashSet::new) do?
//    - bool::then runs the closure only when the bool is true
//    - true  -> Some(HashSet::new())
//    - false -> None
//
// 2. Why does the seed go through push()?
//    - In dedupe mode the seed must be remembered too, otherwise a page
//      linking back to the home page would queue it a second time
//
// 3. Why keep duplicates by default?
//    - The plain mode reproduces the classic "simple spider" behavior,
//      where the queue is just a list that links get appended to
//    - Dedupe is opt-in (--dedupe on the command line)
// -----------------------------------------------------------------------------
