//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! run-level summary they render alongside the registry.

use crate::output::stats::CrawlStatistics;
use crate::state::Registry;
use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Run metadata and statistics for one crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// The seed URL as given
    pub seed: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub statistics: CrawlStatistics,
}

impl CrawlSummary {
    /// Builds a summary for a finished crawl
    pub fn new(
        seed: &Url,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        registry: &Registry,
    ) -> Self {
        Self {
            seed: seed.to_string(),
            started_at,
            finished_at,
            statistics: CrawlStatistics::from_registry(registry, seed),
        }
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds().max(0)
    }
}

/// Trait for output handlers
///
/// An output handler renders the finished crawl somewhere: a terminal, a
/// file, a pipe.
pub trait OutputHandler {
    /// Writes the report for a finished crawl
    ///
    /// # Arguments
    ///
    /// * `summary` - Run metadata and statistics
    /// * `registry` - Every page found, in discovery order
    fn write_report(&mut self, summary: &CrawlSummary, registry: &Registry) -> OutputResult<()>;
}
