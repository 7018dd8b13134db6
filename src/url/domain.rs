use url::Url;

/// Extracts the host key of a URL: the host plus its explicit port
///
/// The `url` crate lowercases hosts of special schemes and drops ports that
/// equal the scheme default, so `http://LOCALHOST:80/` and `http://localhost/`
/// share the key `localhost`, while `http://localhost:8000/` has the key
/// `localhost:8000`.
///
/// # Arguments
///
/// * `url` - The URL to extract the host key from
///
/// # Returns
///
/// * `Some(String)` - The host, with `:port` appended when one is explicit
/// * `None` - If the URL has no host or the host is empty
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_atlas::url::host_key;
///
/// let url = Url::parse("http://localhost:8000/1.html").unwrap();
/// assert_eq!(host_key(&url), Some("localhost:8000".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(host_key(&url), Some("example.com".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Extracts the authority host, with its port, exactly as written
///
/// Userinfo is dropped; case, default ports and percent-escapes are kept.
/// A leading scheme is optional, so network-path references (`//host/x`,
/// and the `\\host\x` spelling browsers accept) are handled too.
///
/// # Examples
///
/// ```
/// use sumi_atlas::url::authority;
///
/// assert_eq!(authority("http://user@LOCALHOST:80/a"), Some("LOCALHOST:80"));
/// assert_eq!(authority("//cdn.example.com/lib.js"), Some("cdn.example.com"));
/// assert_eq!(authority("/docs/index.html"), None);
/// ```
pub fn authority(url: &str) -> Option<&str> {
    let url = url.trim_start_matches(|c: char| c == ' ' || c.is_ascii_control());
    let after_scheme = match url.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => url,
    };

    let mut chars = after_scheme.chars();
    let is_separator = |c: Option<char>| matches!(c, Some('/' | '\\'));
    if !(is_separator(chars.next()) && is_separator(chars.next())) {
        return None;
    }
    let rest = chars.as_str();

    let end = rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    Some(host).filter(|h| !h.is_empty())
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Returns true if both URL strings name the same non-empty authority
///
/// The comparison is on the strings as written: `LOCALHOST:8000` differs
/// from `localhost:8000`, and `localhost:80` differs from `localhost`.
pub fn same_host(reference: &str, page_url: &str) -> bool {
    match (authority(reference), authority(page_url)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
