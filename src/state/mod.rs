//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Page`: one page's URL, the four collections extracted from it, and its outcome
//! - `PageState`: the outcome of processing a page (processed, dead link, unreachable, ...)
//! - `Registry`: the run-scoped map from URL string to `Page`, used for deduplication

mod page;
mod page_state;
mod registry;

// Re-export main types
pub use page::{Collection, Page};
pub use page_state::PageState;
pub use registry::{PageId, Registry};
