//! Sumi-Atlas: a single-host site inventory
//!
//! This crate crawls one website from a seed URL, follows every same-host
//! hyperlink it finds, and records for each page the same-host links it
//! points at plus the images, stylesheets and script files it references.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Atlas operations
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid escape sequence in {0:?}")]
    InvalidEscape(String),

    #[error("Invalid control character in {0:?}")]
    ControlCharacter(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Sumi-Atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, StorePolicy};
pub use crawler::{crawl, Crawler};
pub use state::{Page, PageState, Registry};
pub use url::{resolve, same_host, Resolved};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_sources_convert() {
        let err: AtlasError = UrlError::MissingHost("http:///x".to_string()).into();
        assert!(matches!(err, AtlasError::UrlError(_)));
        assert_eq!(err.to_string(), "URL error: Missing host in URL: http:///x");

        let err: AtlasError = ConfigError::Validation("bad timeout".to_string()).into();
        assert!(matches!(err, AtlasError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Validation error: bad timeout"
        );
    }
}
