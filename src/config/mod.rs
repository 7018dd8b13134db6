//! Configuration module for Sumi-Atlas
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file.
//!
//! # Example
//!
//! ```no_run
//! use sumi_atlas::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("atlas.toml")).unwrap();
//! println!("Request timeout: {}s", config.crawler.request_timeout);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, StorePolicy, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
