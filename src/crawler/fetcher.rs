//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for page content
//! - Classifying failures into page states
//!
//! There is no retry: a failed page is recorded once and the crawl moves on.

use crate::config::Config;
use crate::state::PageState;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered 200 and the body was read
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Raw page body
        body: Vec<u8>,
    },

    /// The server answered with anything other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
        /// The page state this error maps to
        state: PageState,
    },

    /// No response was received (connection refused, timeout, bad scheme, ...)
    NetworkError {
        /// Error description
        error: String,
        /// The page state this error maps to
        state: PageState,
    },

    /// The response arrived but its body could not be read
    BodyError {
        /// The HTTP status code
        status_code: u16,
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_atlas::config::Config;
/// use sumi_atlas::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let redirect = match config.crawler.max_redirects {
        0 => Policy::none(),
        max => Policy::limited(max),
    };

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout))
        .connect_timeout(Duration::from_secs(config.crawler.connect_timeout))
        .redirect(redirect)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Status Handling
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success |
/// | HTTP 404, 410 | HttpError → DeadLink |
/// | Any other status | HttpError → HttpError |
/// | Timeout | NetworkError → Unreachable |
/// | Connection refused, DNS failure | NetworkError → Unreachable |
/// | Anything else | NetworkError → Failed |
/// | Body read failure | BodyError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => return classify_network_error(e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            state: state_for_status(status),
        };
    }

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body: body.to_vec(),
        },
        Err(e) => FetchResult::BodyError {
            status_code: status.as_u16(),
            error: e.to_string(),
        },
    }
}

/// Maps a non-200 status to the page state it leaves the page in
fn state_for_status(status: StatusCode) -> PageState {
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => PageState::DeadLink,
        _ => PageState::HttpError,
    }
}

fn classify_network_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            state: PageState::Unreachable,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            state: PageState::Unreachable,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            state: PageState::Failed,
        }
    }
}
