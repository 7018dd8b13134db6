//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns the HTTP client and drives one crawl:
//! - Registering the seed page
//! - Fetching, parsing and extracting each page
//! - Following same-host links depth-first, each distinct URL string once
//!
//! Traversal is an explicit stack of `(page, next link)` frames. Popping and
//! pushing frames reproduces recursive pre-order exactly: a link is
//! registered and visited at the moment its parent's iteration reaches it.

use crate::config::{Config, StorePolicy};
use crate::crawler::parser::{extract_tags, parse_document};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::state::{Page, PageId, PageState, Registry};
use crate::AtlasError;
use reqwest::Client;
use std::time::Instant;
use url::Url;

/// Main crawler coordinator structure
pub struct Crawler {
    client: Client,
    store_policy: StorePolicy,
}

/// One level of the depth-first traversal
struct Frame {
    page: PageId,
    next_link: usize,
}

impl Crawler {
    /// Creates a crawler with an HTTP client built from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(AtlasError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, AtlasError> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(client, config.crawler.store_policy))
    }

    /// Creates a crawler around an existing HTTP client
    pub fn with_client(client: Client, store_policy: StorePolicy) -> Self {
        Self {
            client,
            store_policy,
        }
    }

    /// Crawls the site reachable from `seed` and returns every page found
    ///
    /// The registry is created here and handed back when the traversal has
    /// unwound. Per-page failures are logged and leave that page without
    /// outgoing links; they never end the run early.
    ///
    /// The seed string becomes the first registry key as given, without
    /// normalisation.
    pub async fn run(&self, seed: &str) -> Registry {
        let start_time = Instant::now();
        let mut registry = Registry::new();

        let Some(seed_id) = registry.insert(Page::new(seed)) else {
            return registry;
        };
        self.visit_page(&mut registry, seed_id).await;

        let mut stack = vec![Frame {
            page: seed_id,
            next_link: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let next = registry
                .page(frame.page)
                .and_then(|page| page.links().get(frame.next_link))
                .cloned();

            let Some(link) = next else {
                stack.pop();
                continue;
            };
            frame.next_link += 1;

            if registry.contains(&link) {
                tracing::trace!("Already registered: {}", link);
                continue;
            }

            if let Some(id) = registry.insert(Page::new(link)) {
                self.visit_page(&mut registry, id).await;
                stack.push(Frame {
                    page: id,
                    next_link: 0,
                });
            }
        }

        debug_assert!(registry.iter().all(|p| p.state().is_terminal()));

        let failed = registry.iter().filter(|p| p.state().is_error()).count();
        tracing::info!(
            "Crawl completed: {} pages ({} failed) in {:?}",
            registry.len(),
            failed,
            start_time.elapsed()
        );

        registry
    }

    async fn visit_page(&self, registry: &mut Registry, id: PageId) {
        if let Some(page) = registry.page_mut(id) {
            self.process_page(page).await;
        }
    }

    /// Fetches, parses and extracts a single page
    ///
    /// On any failure the page is marked with the matching state and its
    /// collections stay empty.
    pub async fn process_page(&self, page: &mut Page) {
        tracing::info!("Getting {}", page.url());

        let url = match Url::parse(page.url()) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot fetch {}: {}", page.url(), e);
                page.mark_failed(PageState::Malformed, None, format!("Invalid URL: {}", e));
                return;
            }
        };

        match fetch_url(&self.client, &url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                if final_url != url.as_str() {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }

                // Relative references resolve against the requested URL
                let document = parse_document(&body);
                extract_tags(&document, &url, self.store_policy, page);
                page.mark_processed(status_code);

                tracing::debug!(
                    "Extracted from {}: {} links, {} images, {} stylesheets, {} scripts",
                    page.url(),
                    page.links().len(),
                    page.images().len(),
                    page.stylesheets().len(),
                    page.scripts().len()
                );
            }

            FetchResult::HttpError { status_code, state } => {
                tracing::warn!("GET request returned {} for {}", status_code, page.url());
                page.mark_failed(state, Some(status_code), format!("HTTP {}", status_code));
            }

            FetchResult::NetworkError { error, state } => {
                tracing::warn!("Error getting {}: {}", page.url(), error);
                page.mark_failed(state, None, error);
            }

            FetchResult::BodyError { status_code, error } => {
                tracing::warn!("Error reading body of {}: {}", page.url(), error);
                page.mark_failed(
                    PageState::Failed,
                    Some(status_code),
                    format!("Failed to read body: {}", error),
                );
            }
        }
    }
}
