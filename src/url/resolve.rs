use crate::url::host_key;
use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// A reference resolved against a page URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The absolute URL
    pub url: Url,

    /// Whether the reference itself named a host (`scheme://host/...` or
    /// `//host/...`). Relative references resolve to `false`.
    pub had_host: bool,
}

/// Resolves a possibly-relative reference against a base URL
///
/// References without a host are joined onto `base` using RFC 3986
/// reference resolution, so scheme and host come from `base` and query and
/// fragment come from the reference. References that carry a host are
/// already absolute; they are returned parsed, with `had_host` set so callers
/// can decide whether to keep the original string.
///
/// # Errors
///
/// Fails with a [`UrlError`] when the reference is not a well-formed URL
/// reference: a `%` outside the query that is not followed by two hex digits,
/// an ASCII control character, or anything the `url` crate rejects.
///
/// # Examples
///
/// ```
/// use sumi_atlas::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:8000/").unwrap();
///
/// let relative = resolve(&base, "1.html").unwrap();
/// assert_eq!(relative.url.as_str(), "http://localhost:8000/1.html");
/// assert!(!relative.had_host);
///
/// let absolute = resolve(&base, "http://www.other.com/x").unwrap();
/// assert!(absolute.had_host);
///
/// assert!(resolve(&base, "%gh&%ij").is_err());
/// ```
pub fn resolve(base: &Url, reference: &str) -> UrlResult<Resolved> {
    check_reference(reference)?;

    match Url::parse(reference) {
        Ok(url) if has_host(&url) => Ok(Resolved {
            url,
            had_host: true,
        }),
        // Absolute but hostless (mailto:, data:, file:///...): joining yields the
        // reference itself, normalised the same way relative results are.
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => {
            let url = base
                .join(reference)
                .map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)))?;
            let had_host = has_host(&url)
                && (is_network_path(base, reference) || host_key(&url) != host_key(base));
            Ok(Resolved { url, had_host })
        }
        Err(e) => Err(UrlError::Parse(format!("{}: {}", reference, e))),
    }
}

fn has_host(url: &Url) -> bool {
    url.host_str().is_some_and(|h| !h.is_empty())
}

/// `//host/path` references inherit only the scheme from the base
///
/// Matches how the `url` crate reads them: leading spaces are ignored, and
/// for http(s) bases `\\` counts as a slash.
fn is_network_path(base: &Url, reference: &str) -> bool {
    let reference = reference.trim_start_matches(' ');
    let mut chars = reference.chars();
    let is_slash = |c: Option<char>| match c {
        Some('/') => true,
        Some('\\') => base.is_special(),
        _ => false,
    };
    is_slash(chars.next()) && is_slash(chars.next())
}

/// Rejects references the `url` crate would silently repair
///
/// The `url` crate percent-encodes stray `%` signs and strips control
/// characters. Such references are malformed and must not produce an entry.
/// Query strings are passed through untouched, so escapes there are not
/// checked.
fn check_reference(reference: &str) -> UrlResult<()> {
    if reference.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlError::ControlCharacter(reference.to_string()));
    }

    let (before_fragment, fragment) = match reference.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (reference, None),
    };
    let before_query = before_fragment
        .split_once('?')
        .map_or(before_fragment, |(head, _)| head);

    if !valid_escapes(before_query) || !fragment.map_or(true, valid_escapes) {
        return Err(UrlError::InvalidEscape(reference.to_string()));
    }

    Ok(())
}

fn valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            match hex {
                Some(pair) if pair.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}
