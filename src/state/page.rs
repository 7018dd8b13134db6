use crate::state::PageState;

/// The four ordered collections gathered from a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Same-host hyperlinks (`<a href>`)
    Links,
    /// `<img src>` targets, any host
    Images,
    /// `<link rel="stylesheet" href>` targets, any host
    Stylesheets,
    /// `<script src>` targets, any host
    Scripts,
}

impl Collection {
    /// All collections in report order
    pub const ALL: [Collection; 4] = [
        Collection::Links,
        Collection::Images,
        Collection::Stylesheets,
        Collection::Scripts,
    ];

    /// Human-readable label used by the reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Links => "Links",
            Self::Images => "Images",
            Self::Stylesheets => "Style Sheets",
            Self::Scripts => "Script Files",
        }
    }
}

/// A crawled page and everything it references
///
/// The URL is fixed at construction. The collections are append-only and are
/// filled while the page is processed; duplicates within a page are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    url: String,
    links: Vec<String>,
    images: Vec<String>,
    stylesheets: Vec<String>,
    scripts: Vec<String>,
    state: PageState,
    status_code: Option<u16>,
    error: Option<String>,
}

impl Page {
    /// Creates an empty, not yet visited page
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            links: Vec::new(),
            images: Vec::new(),
            stylesheets: Vec::new(),
            scripts: Vec::new(),
            state: PageState::Discovered,
            status_code: None,
            error: None,
        }
    }

    /// The URL string this page was registered under
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    /// Returns one of the four collections
    pub fn collection(&self, collection: Collection) -> &[String] {
        match collection {
            Collection::Links => &self.links,
            Collection::Images => &self.images,
            Collection::Stylesheets => &self.stylesheets,
            Collection::Scripts => &self.scripts,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// HTTP status of the fetch, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Why processing stopped, for pages in an error state
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Appends an entry to one of the collections
    pub(crate) fn record(&mut self, collection: Collection, value: String) {
        match collection {
            Collection::Links => self.links.push(value),
            Collection::Images => self.images.push(value),
            Collection::Stylesheets => self.stylesheets.push(value),
            Collection::Scripts => self.scripts.push(value),
        }
    }

    pub(crate) fn mark_processed(&mut self, status_code: u16) {
        self.state = PageState::Processed;
        self.status_code = Some(status_code);
        self.error = None;
    }

    pub(crate) fn mark_failed(
        &mut self,
        state: PageState,
        status_code: Option<u16>,
        error: impl Into<String>,
    ) {
        self.state = state;
        self.status_code = status_code;
        self.error = Some(error.into());
    }
}
