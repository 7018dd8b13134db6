//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl:
//! run information, statistics, failed pages and the per-page inventory.

use crate::output::traits::{CrawlSummary, OutputError, OutputHandler, OutputResult};
use crate::state::{Collection, PageState, Registry};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Generates a markdown summary and writes it to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(
    summary: &CrawlSummary,
    registry: &Registry,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary, registry);

    let to_file_error = |source| OutputError::File {
        path: output_path.display().to_string(),
        source,
    };
    let mut file = File::create(output_path).map_err(to_file_error)?;
    file.write_all(markdown.as_bytes()).map_err(to_file_error)?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary, registry: &Registry) -> String {
    let stats = &summary.statistics;
    let mut md = String::new();

    // Title
    md.push_str("# Sumi-Atlas Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", summary.seed));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", summary.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n\n",
        summary.duration_seconds()
    ));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Total Pages**: {}\n", stats.total_pages));
    md.push_str(&format!("- **Links**: {}\n", stats.total_links));
    md.push_str(&format!("- **Images**: {}\n", stats.total_images));
    md.push_str(&format!("- **Style Sheets**: {}\n", stats.total_stylesheets));
    md.push_str(&format!("- **Script Files**: {}\n", stats.total_scripts));
    md.push_str(&format!("- **Unique Assets**: {}\n", stats.unique_assets));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // State breakdown
    md.push_str("## Page State Breakdown\n\n");
    md.push_str("| State | Count |\n");
    md.push_str("|-------|-------|\n");
    for state in PageState::all_states() {
        let count = stats.count(state);
        if count > 0 {
            md.push_str(&format!("| {} | {} |\n", state, count));
        }
    }
    md.push('\n');

    // Failed pages
    let failed: Vec<_> = registry.iter().filter(|p| p.state().is_error()).collect();
    if !failed.is_empty() {
        md.push_str("## Failed Pages\n\n");
        md.push_str("| URL | State | Status | Error |\n");
        md.push_str("|-----|-------|--------|-------|\n");
        for page in failed {
            let status = page
                .status_code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "-".to_string());
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                page.url(),
                page.state(),
                status,
                page.error().unwrap_or("")
            ));
        }
        md.push('\n');
    }

    // External asset hosts
    if !stats.external_asset_hosts.is_empty() {
        md.push_str("## External Asset Hosts\n\n");
        for host in &stats.external_asset_hosts {
            md.push_str(&format!("- {}\n", host));
        }
        md.push('\n');
    }

    // Per-page inventory
    md.push_str("## Pages\n\n");
    for page in registry {
        md.push_str(&format!("### {}\n\n", page.url()));
        for collection in Collection::ALL {
            let entries = page.collection(collection);
            md.push_str(&format!("**{}** ({})\n\n", collection.label(), entries.len()));
            for entry in entries {
                md.push_str(&format!("- {}\n", entry));
            }
            if !entries.is_empty() {
                md.push('\n');
            }
        }
    }

    md
}

/// Writes the markdown summary to a file when the crawl finishes
pub struct MarkdownOutput {
    path: PathBuf,
}

impl MarkdownOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownOutput {
    fn write_report(&mut self, summary: &CrawlSummary, registry: &Registry) -> OutputResult<()> {
        generate_markdown_summary(summary, registry, &self.path)?;
        tracing::info!("Summary written to {}", self.path.display());
        Ok(())
    }
}
