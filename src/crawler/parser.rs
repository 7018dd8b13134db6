//! HTML parser and tag extractor
//!
//! This module turns a fetched body into a document tree and walks it,
//! collecting one target URL per recognised element:
//!
//! | Tag | Attribute | Gate | Collection | Host policy |
//! |-----|-----------|------|------------|-------------|
//! | `a` | `href` | none | links | relative, or absolute on the page's host |
//! | `img` | `src` | none | images | any host |
//! | `link` | `href` | `rel` = `stylesheet` (case-insensitive) | stylesheets | any host |
//! | `script` | `src` | none | scripts | any host |
//!
//! Relative references are stored resolved against the page URL. Absolute
//! references are stored exactly as written, unless the store policy asks
//! for the resolved form. A missing or malformed attribute adds nothing and
//! never stops the walk.

use crate::config::StorePolicy;
use crate::state::{Collection, Page};
use crate::url::{resolve, same_host, Resolved};
use scraper::node::Element;
use scraper::Html;
use url::Url;

/// Builds a document tree from a response body
///
/// Bodies are decoded as UTF-8; invalid sequences are replaced rather than
/// rejected, and html5ever recovers from any markup error, so every body
/// yields a tree.
pub fn parse_document(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

/// Parses HTML and extracts its tags into a fresh page for `base_url`
///
/// # Example
///
/// ```
/// use sumi_atlas::config::StorePolicy;
/// use sumi_atlas::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<a href="1.html">One</a><a href="http://www.other.com/x">Other</a>"#;
/// let base_url = Url::parse("http://localhost:8000/").unwrap();
/// let page = parse_html(html, &base_url, StorePolicy::Verbatim);
/// assert_eq!(page.links(), &["http://localhost:8000/1.html"]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, policy: StorePolicy) -> Page {
    let document = Html::parse_document(html);
    let mut page = Page::new(base_url.as_str());
    extract_tags(&document, base_url, policy, &mut page);
    page
}

/// Walks the document in pre-order and records every recognised tag on `page`
///
/// Children are visited in document order. Only element nodes are
/// classified; the walk continues into the children of every node whether
/// or not it matched.
pub fn extract_tags(document: &Html, base_url: &Url, policy: StorePolicy, page: &mut Page) {
    let page_url = page.url().to_string();

    for node in document.tree.root().descendants() {
        let Some(element) = node.value().as_element() else {
            continue;
        };

        if let Some((collection, target)) = extract_element(element, base_url, &page_url, policy)
        {
            page.record(collection, target);
        }
    }
}

/// Classifies one element and extracts at most one target from it
fn extract_element(
    element: &Element,
    base_url: &Url,
    page_url: &str,
    policy: StorePolicy,
) -> Option<(Collection, String)> {
    match element.name() {
        "a" => extract_anchor(element, base_url, page_url, policy).map(|t| (Collection::Links, t)),
        "img" => extract_asset(element, "src", base_url, policy).map(|t| (Collection::Images, t)),
        "link" if is_stylesheet(element) => {
            extract_asset(element, "href", base_url, policy).map(|t| (Collection::Stylesheets, t))
        }
        "script" => {
            extract_asset(element, "src", base_url, policy).map(|t| (Collection::Scripts, t))
        }
        _ => None,
    }
}

/// `<a href>`: relative targets and targets on the page's own host
///
/// The host check compares the authority of the href with that of the page
/// URL, both as written.
fn extract_anchor(
    element: &Element,
    base_url: &Url,
    page_url: &str,
    policy: StorePolicy,
) -> Option<String> {
    let raw = first_attr(element, "href")?;
    let resolved = resolve_reference(base_url, raw)?;

    if !resolved.had_host {
        return Some(resolved.url.to_string());
    }

    if same_host(raw, page_url) {
        Some(stored_form(raw, &resolved, policy))
    } else {
        tracing::trace!("Skipping off-host link {}", raw);
        None
    }
}

/// `<img src>`, `<link href>`, `<script src>`: any host
fn extract_asset(
    element: &Element,
    attr: &str,
    base_url: &Url,
    policy: StorePolicy,
) -> Option<String> {
    let raw = first_attr(element, attr)?;
    let resolved = resolve_reference(base_url, raw)?;

    if resolved.had_host {
        Some(stored_form(raw, &resolved, policy))
    } else {
        Some(resolved.url.to_string())
    }
}

/// True when some attribute is `rel` (any case) with value `stylesheet` (any case)
fn is_stylesheet(element: &Element) -> bool {
    element
        .attrs()
        .any(|(name, value)| name.eq_ignore_ascii_case("rel") && value.eq_ignore_ascii_case("stylesheet"))
}

/// First attribute with exactly this name, in document order
fn first_attr<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element
        .attrs()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn resolve_reference(base_url: &Url, raw: &str) -> Option<Resolved> {
    match resolve(base_url, raw) {
        Ok(resolved) => Some(resolved),
        Err(e) => {
            tracing::debug!("Skipping reference on {}: {}", base_url, e);
            None
        }
    }
}

/// How an absolute reference is written into a collection
fn stored_form(raw: &str, resolved: &Resolved, policy: StorePolicy) -> String {
    match policy {
        StorePolicy::Verbatim => raw.to_string(),
        StorePolicy::Resolved => resolved.url.to_string(),
    }
}
