// src/page/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use html5ever's *tokenizer* (the first half of the parser behind the
// `scraper` crate) which:
// - Turns markup into a stream of tokens: start tags, end tags, text, ...
// - Never rejects input: broken HTML still produces tokens
// - Does NOT build a tree, so nothing is "repaired": an unclosed <a> is never
//   copied, and anchors inside <noscript> are seen like any other
//
// Every <a> start tag with an href attribute gives exactly one link.
//
// We also use the `url` crate to resolve relative links against the page
// they were found on (the "base URL").
//
// Rust concepts:
// - Traits: We implement html5ever's TokenSink to receive the tokens
// - Option<T>: For values that might not exist (an unparseable base URL)
// =============================================================================

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use url::Url;

// Receives tokens from the tokenizer and keeps the raw href of every anchor
#[derive(Debug, Default)]
struct AnchorSink {
    hrefs: Vec<String>,
}

impl TokenSink for AnchorSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let tag = match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => tag,
            _ => return TokenSinkResult::Continue,
        };

        match &*tag.name {
            "a" => {
                if let Some(href) = href_of(&tag) {
                    self.hrefs.push(href);
                }
                TokenSinkResult::Continue
            }
            // Their contents are text, not markup: a "<a" inside a script is
            // just part of the script
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "style" => TokenSinkResult::RawData(RawKind::Rawtext),
            _ => TokenSinkResult::Continue,
        }
    }
}

// The tokenizer lowercases attribute names, so HREF and href both match
fn href_of(tag: &Tag) -> Option<String> {
    tag.attrs
        .iter()
        .find(|attr| &*attr.name.local == "href")
        .map(|attr| attr.value.to_string())
}

// Extracts every anchor link from HTML content, in document order
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: Vec<String> containing the absolute URLs, duplicates included
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com/page"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(AnchorSink::default(), TokenizerOpts::default());
    // The sink never asks to pause for a script, so one feed reads everything
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    // If the base URL is invalid we can still keep links that are already absolute
    let base = Url::parse(base_url).ok();
    if base.is_none() {
        tracing::debug!("Cannot resolve relative links against {}", base_url);
    }

    let mut links = Vec::new();
    for href in tokenizer.sink.hrefs {
        match resolve_url(base.as_ref(), &href) {
            Some(absolute_url) => links.push(absolute_url),
            None => {
                tracing::debug!("Skipping unresolvable href {:?}", href);
            }
        }
    }

    links
}

// Resolves a possibly-relative URL to an absolute URL
//
// Examples with base = "http://a.com/x/page":
//   href = "y.html"             -> Some("http://a.com/x/y.html")
//   href = "/docs"              -> Some("http://a.com/docs")
//   href = "//cdn.test/lib.js"  -> Some("http://cdn.test/lib.js")
//   href = "?q=1"               -> Some("http://a.com/x/page?q=1")
//   href = "https://other.com"  -> Some("https://other.com/")
fn resolve_url(base: Option<&Url>, href: &str) -> Option<String> {
    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };

    resolved.ok().map(|url| url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a tokenizer instead of a full HTML parser?
//    - A full parser (like scraper's Html::parse_document) builds a tree and
//      fixes broken markup the way a browser does
//    - Fixing can duplicate elements: "<p><a href=x>one</p>two" ends up with
//      two <a> elements in the tree, so we would queue the link twice
//    - The tokenizer reports what is literally in the file, one tag at a time
//
// 2. Why doesn't this function return a Result?
//    - A crawler sees a lot of broken HTML
//    - The tokenizer always produces *some* tokens, so it can't fail
//    - A single bad href is skipped instead of throwing away the whole page
//
// 3. What does Url::join do?
//    - It applies the standard rules browsers use for relative links
//    - "y.html" replaces the last path segment of the base
//    - "/y.html" replaces the whole path
//    - "//host/y.html" keeps only the scheme of the base
//    - An absolute URL ignores the base completely
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_file() {
        let html = r#"<a href="y.html">Y</a>"#;
        let links = extract_links(html, "http://a.com/x/");
        assert_eq!(links, vec!["http://a.com/x/y.html"]);
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let html = r#"<a href="y.html">Y</a>"#;
        let first = extract_links(html, "http://a.com/x/");
        let second = extract_links(html, "http://a.com/x/");
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_root_relative_link() {
        let html = r#"<a href="/page2">x</a>"#;
        let links = extract_links(html, "http://example.test/");
        assert_eq!(links, vec!["http://example.test/page2"]);
    }

    #[test]
    fn test_resolve_protocol_relative_link() {
        let html = r#"<a href="//cdn.test/lib">lib</a>"#;
        let links = extract_links(html, "https://a.com/x/page");
        assert_eq!(links, vec!["https://cdn.test/lib"]);
    }

    #[test]
    fn test_resolve_query_and_fragment() {
        let html = r##"<a href="?q=1">q</a><a href="#top">top</a>"##;
        let links = extract_links(html, "http://a.com/x/page");
        assert_eq!(
            links,
            vec!["http://a.com/x/page?q=1", "http://a.com/x/page#top"]
        );
    }

    #[test]
    fn test_resolve_parent_directory() {
        let html = r#"<a href="../about">About</a>"#;
        let links = extract_links(html, "https://example.com/page/sub/");
        assert_eq!(links, vec!["https://example.com/page/about"]);
    }

    #[test]
    fn test_keeps_document_order_and_duplicates() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="/docs">Docs again</a>
        "#;
        let links = extract_links(html, "https://example.com/page/");
        assert_eq!(
            links,
            vec![
                "https://rust-lang.org/",
                "https://example.com/docs",
                "https://example.com/docs",
            ]
        );
    }

    #[test]
    fn test_ignores_other_elements() {
        let html = r#"
            <link href="/style.css" rel="stylesheet">
            <img src="/logo.png">
            <a name="anchor-without-href">nothing</a>
            <a href="/real">real</a>
        "#;
        let links = extract_links(html, "https://example.com/");
        assert_eq!(links, vec!["https://example.com/real"]);
    }

    #[test]
    fn test_keeps_non_http_schemes() {
        let html = r#"<a href="mailto:test@example.com">Email</a>"#;
        let links = extract_links(html, "https://example.com");
        assert_eq!(links, vec!["mailto:test@example.com"]);
    }

    #[test]
    fn test_uppercase_tags() {
        let html = r#"<A HREF="/shout">LOUD</A>"#;
        let links = extract_links(html, "https://example.com/");
        assert_eq!(links, vec!["https://example.com/shout"]);
    }

    #[test]
    fn test_malformed_markup() {
        let html = r#"<div><a href="/ok">ok<p><a href=/also>also</div></table><<>"#;
        let links = extract_links(html, "https://example.com/");
        assert_eq!(
            links,
            vec!["https://example.com/ok", "https://example.com/also"]
        );
    }

    #[test]
    fn test_unclosed_anchor_is_reported_once() {
        let html = r#"<p><a href="/x">one</p>two<div>three</div>"#;
        let links = extract_links(html, "http://a.test/");
        assert_eq!(links, vec!["http://a.test/x"]);
    }

    #[test]
    fn test_unclosed_anchor_keeps_following_links_in_order() {
        let html = r#"<p><a href="/a">x</p>y <a href="/b">b</a>"#;
        let links = extract_links(html, "http://a.test/");
        assert_eq!(links, vec!["http://a.test/a", "http://a.test/b"]);
    }

    #[test]
    fn test_anchor_inside_noscript() {
        let html = r#"<body><noscript><a href="/n">n</a></noscript></body>"#;
        let links = extract_links(html, "http://a.test/");
        assert_eq!(links, vec!["http://a.test/n"]);
    }

    #[test]
    fn test_ignores_markup_inside_script_and_style() {
        let html = r#"
            <script>document.write('<a href="/js">js</a>');</script>
            <style>a[href="/css"] { color: red }</style>
            <a href="/real">real</a>
        "#;
        let links = extract_links(html, "http://a.test/");
        assert_eq!(links, vec!["http://a.test/real"]);
    }

    #[test]
    fn test_skips_unresolvable_href() {
        let html = r#"<a href="http://[::1">broken</a><a href="/fine">fine</a>"#;
        let links = extract_links(html, "https://example.com/");
        assert_eq!(links, vec!["https://example.com/fine"]);
    }

    #[test]
    fn test_invalid_base_keeps_absolute_links() {
        let html = r#"<a href="/relative">r</a><a href="https://abs.test/x">a</a>"#;
        let links = extract_links(html, "not a url");
        assert_eq!(links, vec!["https://abs.test/x"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_links("", "https://example.com/").is_empty());
    }
}
