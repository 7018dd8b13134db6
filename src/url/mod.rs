//! URL handling module for Sumi-Atlas
//!
//! This module provides reference resolution against a page URL, the
//! host-matching policy used to decide which links stay on the site, and
//! seed URL validation.

mod domain;
mod resolve;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{authority, host_key, same_host};
pub use resolve::{resolve, Resolved};

/// Validates the URL a crawl starts from
///
/// The seed must be an absolute `http` or `https` URL with a host. This is
/// the only URL check that stops a crawl before it starts.
///
/// # Examples
///
/// ```
/// use sumi_atlas::url::parse_seed;
///
/// assert!(parse_seed("http://localhost:8000").is_ok());
/// assert!(parse_seed("localhost:8000").is_err());
/// assert!(parse_seed("/relative/path").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::Parse(format!(
            "{}: only http and https seeds are supported",
            seed
        )));
    }

    if host_key(&url).is_none() {
        return Err(UrlError::MissingHost(seed.to_string()));
    }

    Ok(url)
}
