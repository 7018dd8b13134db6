use serde::Deserialize;

/// Main configuration structure for Sumi-Atlas
///
/// Every section and key has a default, so an empty file (or no file at
/// all) yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// How absolute references found in tags are stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorePolicy {
    /// Absolute references are stored as written in the document; relative
    /// ones are stored resolved
    #[default]
    Verbatim,
    /// Every reference is stored in its resolved absolute form
    Resolved,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Total time allowed for one request (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Time allowed to establish a connection (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,

    /// Maximum number of redirects followed per request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Verbatim or resolved storage of absolute references
    #[serde(rename = "store-policy")]
    pub store_policy: StorePolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout: 30,
            connect_timeout: 10,
            max_redirects: 10,
            store_policy: StorePolicy::Verbatim,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiAtlas".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the markdown summary file, if one should be written
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}
