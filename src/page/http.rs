// src/page/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - Makes one GET request per URL (failures are final, no retries)
// - Hands back the declared Content-Type plus the raw body bytes
// - Turns every way a fetch can go wrong into a FetchError
//
// The crawler never needs more detail than "this URL was unusable", but we
// keep the error categories around so the per-page report can say why.
//
// Rust concepts:
// - thiserror: Derives Display and Error for our own error enum
// - Result<T, E>: Every fetch either returns a page or explains the failure
// =============================================================================

use reqwest::{header::CONTENT_TYPE, redirect, Client};
use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;

/// Everything that can make a URL unusable for the crawler.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("request timed out")]
    Timeout,
    /// Could not reach the host (DNS failure, connection refused, ...)
    #[error("connection failed: {0}")]
    Connect(String),
    /// Server answered, but not with a 2xx status
    #[error("HTTP {0}")]
    Status(u16),
    /// Redirect chain longer than the configured limit
    #[error("too many redirects")]
    TooManyRedirects,
    /// Anything else reqwest rejects: bad URL, unsupported scheme, body read errors
    #[error("request failed: {0}")]
    Request(String),
    /// An HTML body that isn't valid UTF-8
    #[error("body is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),
}

/// Settings for the HTTP client, filled in from the command line.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            user_agent: format!("word-spider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A successful response: what the server said it sent, and the bytes it sent.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Raw Content-Type header value ("" when the header is missing)
    pub content_type: String,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// True when the declared content type is an HTML media type
    pub fn is_html(&self) -> bool {
        is_html_content_type(&self.content_type)
    }

    /// Decodes the body as UTF-8 text
    pub fn text(self) -> Result<String, FetchError> {
        Ok(String::from_utf8(self.body)?)
    }
}

/// Thin wrapper around a reusable reqwest client.
///
/// One client is built per crawl and shared by every fetch, so connections
/// to the same host are pooled.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    /// Fetches a single URL
    ///
    /// Parameters:
    ///   url: the URL to fetch, passed to reqwest as-is
    ///
    /// Returns: the page's content type and body, or why it couldn't be fetched
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.bytes().await.map_err(categorize_error)?.to_vec();

        tracing::debug!("{} -> {} bytes ({})", url, body.len(), content_type);

        Ok(FetchedPage { content_type, body })
    }
}

// Checks whether a Content-Type header value names an HTML document
//
// Only the media type counts; parameters like charset are ignored:
//   "text/html; charset=utf-8" -> true
//   "TEXT/HTML"                -> true
//   "image/png"                -> false
fn is_html_content_type(content_type: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    media_type.eq_ignore_ascii_case("text/html")
        || media_type.eq_ignore_ascii_case("application/xhtml+xml")
}

// Sorts reqwest errors into our categories
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}
