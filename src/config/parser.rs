use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a crawl can be tied to the exact configuration it
/// ran with.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorePolicy;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
request-timeout = 15
connect-timeout = 5
max-redirects = 3
store-policy = "resolved"

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"

[output]
summary-path = "./atlas.md"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.request_timeout, 15);
        assert_eq!(config.crawler.connect_timeout, 5);
        assert_eq!(config.crawler.max_redirects, 3);
        assert_eq!(config.crawler.store_policy, StorePolicy::Resolved);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
        assert_eq!(config.output.summary_path.as_deref(), Some("./atlas.md"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.crawler.request_timeout, 30);
        assert_eq!(config.crawler.connect_timeout, 10);
        assert_eq!(config.crawler.max_redirects, 10);
        assert_eq!(config.crawler.store_policy, StorePolicy::Verbatim);
        assert_eq!(config.user_agent.crawler_name, "SumiAtlas");
        assert!(config.user_agent.contact_url.is_none());
        assert!(config.output.summary_path.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[crawler]\nmax-redirects = 0\n").unwrap();

        assert_eq!(config.crawler.max_redirects, 0);
        assert_eq!(config.crawler.request_timeout, 30);
    }

    #[test]
    fn test_unknown_store_policy_rejected() {
        let result = parse_config("[crawler]\nstore-policy = \"sometimes\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
request-timeout = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex characters
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_load_config_with_hash() {
        let file = create_temp_config("[output]\nsummary-path = \"out.md\"\n");
        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.output.summary_path.as_deref(), Some("out.md"));
        assert_eq!(hash.len(), 64);
    }
}
