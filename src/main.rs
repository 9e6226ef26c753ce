// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up tracing (diagnostics go to stderr, controlled by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Run the crawl, printing a line before every fetch and a marker after it
// 4. Exit with proper code (0 = crawl ran to completion, 2 = error)
//
// Whether the word was found is reported on stdout, not in the exit code:
// a crawl that never finds the word is still a normal run.
//
// Rust concepts used:
// - async/await: The HTTP client is async, so main runs inside tokio
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Closures: The crawl calls us back after every page
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - frontier and crawl loop
mod page; // src/page/ - fetching pages and extracting links

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use crawl::{CrawlEvent, CrawlOutcome, Spider, VisitStatus};
use page::PageFetcher;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics are off unless RUST_LOG asks for them (e.g. RUST_LOG=debug),
// and they go to stderr so they never mix with the report on stdout
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = the crawl ran to completion (word found or not)
//   Err   = could not even start (e.g. HTTP client failed to build)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let fetcher = PageFetcher::new(&cli.fetch_config())?;
    let spider = Spider::new(fetcher, cli.crawl_config());

    let outcome = if cli.quiet {
        spider.spider(&cli.url, &cli.word, cli.max_pages).await
    } else {
        let report = spider
            .run_with_progress(&cli.url, &cli.word, cli.max_pages, |event| {
                if !cli.json {
                    print_event(event);
                }
            })
            .await;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        report.outcome
    };

    if !cli.json {
        print_outcome(&outcome, &cli.word);
    } else if cli.quiet {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(0)
}

// Prints progress for one page, e.g.
//   3 visiting: https://example.com/about   (before the fetch)
//   **success**                              (after it)
fn print_event(event: CrawlEvent<'_>) {
    match event {
        CrawlEvent::Visiting { number, url } => println!("{} visiting: {}", number, url),
        CrawlEvent::Visited(visit) => match &visit.status {
            VisitStatus::Failed { reason } => println!("**failed** ({})", reason),
            _ => println!("**success**"),
        },
    }
}

fn print_outcome(outcome: &CrawlOutcome, word: &str) {
    match outcome {
        CrawlOutcome::Found { url } => println!("The word {:?} was found at {}", word, url),
        CrawlOutcome::NotFound => println!("word never found"),
    }
}
