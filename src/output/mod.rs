//! Output module for crawl reports
//!
//! This module handles:
//! - The per-page text report
//! - Markdown summaries written to a file
//! - Crawl statistics

mod markdown;
pub mod stats;
mod text;
mod traits;

pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownOutput};
pub use stats::{print_statistics, CrawlStatistics};
pub use text::{format_page, format_report, TextOutput};
pub use traits::{CrawlSummary, OutputError, OutputHandler, OutputResult};
