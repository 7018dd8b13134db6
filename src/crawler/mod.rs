//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing and tag extraction
//! - Depth-first traversal of same-host links

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{extract_tags, parse_document, parse_html};

use crate::config::Config;
use crate::state::Registry;
use crate::url::parse_seed;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL
/// 2. Build the HTTP client
/// 3. Visit the seed and every same-host page reachable from it
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The URL to start from
///
/// # Returns
///
/// * `Ok(Registry)` - Every page found, in discovery order
/// * `Err(AtlasError)` - The seed URL is invalid or the client could not be built
pub async fn crawl(config: &Config, seed: &str) -> Result<Registry> {
    parse_seed(seed)?;
    let crawler = Crawler::new(config)?;
    Ok(crawler.run(seed).await)
}
