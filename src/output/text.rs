//! Plain text report
//!
//! One block per page, in discovery order:
//!
//! ```text
//! URL: http://localhost:8000/
//!     Links(1):
//!         http://localhost:8000/1.html
//!     Images(0):
//!     Style Sheets(0):
//!     Script Files(0):
//! ```

use crate::output::traits::{CrawlSummary, OutputHandler, OutputResult};
use crate::state::{Collection, Page, Registry};
use std::io::Write;

/// Formats a single page as a text block
pub fn format_page(page: &Page) -> String {
    let mut text = format!("URL: {}\n", page.url());

    for collection in Collection::ALL {
        let entries = page.collection(collection);
        text.push_str(&format!("    {}({}):\n", collection.label(), entries.len()));
        for entry in entries {
            text.push_str(&format!("        {}\n", entry));
        }
    }

    text
}

/// Formats every page in the registry
pub fn format_report(registry: &Registry) -> String {
    registry.iter().map(format_page).collect()
}

/// Writes the text report to any writer (stdout, a file, a buffer)
pub struct TextOutput<W: Write> {
    writer: W,
}

impl<W: Write> TextOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputHandler for TextOutput<W> {
    fn write_report(&mut self, _summary: &CrawlSummary, registry: &Registry) -> OutputResult<()> {
        for page in registry {
            self.writer.write_all(format_page(page).as_bytes())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
