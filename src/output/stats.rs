//! Statistics generation from a crawl registry
//!
//! This module provides functionality for summarising and displaying what
//! a crawl found.

use crate::state::{Collection, PageState, Registry};
use crate::url::host_key;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use url::Url;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of pages in the registry
    pub total_pages: u64,

    /// Count of pages by state
    pub pages_by_state: BTreeMap<PageState, u64>,

    /// Entries per collection, duplicates included
    pub total_links: u64,
    pub total_images: u64,
    pub total_stylesheets: u64,
    pub total_scripts: u64,

    /// Distinct image, stylesheet and script strings across all pages
    pub unique_assets: u64,

    /// Hosts other than the seed's that serve images, stylesheets or scripts
    pub external_asset_hosts: Vec<String>,
}

impl CrawlStatistics {
    /// Computes statistics for every page in the registry
    ///
    /// # Arguments
    ///
    /// * `registry` - The pages found by the crawl
    /// * `seed` - The seed URL; asset hosts are compared against its host
    pub fn from_registry(registry: &Registry, seed: &Url) -> Self {
        let mut stats = Self::default();
        let mut assets = HashSet::new();
        let mut external_hosts = BTreeSet::new();
        let seed_host = host_key(seed);

        for page in registry {
            stats.total_pages += 1;
            *stats.pages_by_state.entry(page.state()).or_insert(0) += 1;

            stats.total_links += page.links().len() as u64;
            stats.total_images += page.images().len() as u64;
            stats.total_stylesheets += page.stylesheets().len() as u64;
            stats.total_scripts += page.scripts().len() as u64;

            for collection in [Collection::Images, Collection::Stylesheets, Collection::Scripts] {
                for asset in page.collection(collection) {
                    if !assets.insert(asset.as_str()) {
                        continue;
                    }

                    // Verbatim entries may be scheme-relative, so join rather than parse
                    let host = seed.join(asset).ok().and_then(|url| host_key(&url));
                    if let Some(host) = host {
                        if Some(&host) != seed_host.as_ref() {
                            external_hosts.insert(host);
                        }
                    }
                }
            }
        }

        stats.unique_assets = assets.len() as u64;
        stats.external_asset_hosts = external_hosts.into_iter().collect();
        stats
    }

    /// Number of pages in the given state
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Number of pages that were visited but yielded nothing
    pub fn failed_pages(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Number of pages fetched and extracted
    pub fn successful_pages(&self) -> u64 {
        self.pages_by_state
            .iter()
            .filter(|(state, _)| state.is_success())
            .map(|(_, count)| count)
            .sum()
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.successful_pages() as f64 / self.total_pages as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total pages: {}", stats.total_pages);
    println!("  Links: {}", stats.total_links);
    println!("  Images: {}", stats.total_images);
    println!("  Style sheets: {}", stats.total_stylesheets);
    println!("  Script files: {}", stats.total_scripts);
    println!("  Unique assets: {}", stats.unique_assets);
    println!();

    println!("Pages by State:");
    // Sort states by count (descending)
    let mut state_counts: Vec<_> = stats.pages_by_state.iter().collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1));

    for (state, count) in state_counts {
        let percentage = if stats.total_pages > 0 {
            (*count as f64 / stats.total_pages as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", state, count, percentage);
    }
    println!();

    if !stats.external_asset_hosts.is_empty() {
        println!(
            "External Asset Hosts ({}):",
            stats.external_asset_hosts.len()
        );
        for host in &stats.external_asset_hosts {
            println!("  - {}", host);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully processed)",
        stats.success_rate(),
        stats.successful_pages(),
        stats.total_pages
    );
}
