use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_timeout < 1 || config.request_timeout > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be between 1 and 300 seconds, got {}",
            config.request_timeout
        )));
    }

    if config.connect_timeout < 1 || config.connect_timeout > 120 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout must be between 1 and 120 seconds, got {}",
            config.connect_timeout
        )));
    }

    if config.connect_timeout > config.request_timeout {
        return Err(ConfigError::Validation(format!(
            "connect_timeout ({}s) cannot exceed request_timeout ({}s)",
            config.connect_timeout, config.request_timeout
        )));
    }

    if config.max_redirects > 20 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be at most 20, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() || config.crawler_version.contains(char::is_whitespace)
    {
        return Err(ConfigError::Validation(format!(
            "crawler_version must be non-empty without whitespace, got '{}'",
            config.crawler_version
        )));
    }

    if let Some(contact) = &config.contact_url {
        let url = Url::parse(contact)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "contact_url '{}' must use http or https",
                contact
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.summary_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "summary_path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
