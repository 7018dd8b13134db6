use crate::state::Page;
use std::collections::HashMap;

/// Position of a page in the registry
pub type PageId = usize;

/// Run-scoped map from URL string to its page
///
/// Keys are exact strings, so `http://h/` and `http://h` are distinct pages.
/// A URL is inserted at most once. Iteration follows insertion order, which
/// is the order pages were discovered in.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pages: Vec<Page>,
    index: HashMap<String, PageId>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a page is registered under exactly this string
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// Registers a page
    ///
    /// Returns the new page's id, or `None` if its URL is already registered;
    /// in that case the registry is left untouched.
    pub fn insert(&mut self, page: Page) -> Option<PageId> {
        if self.index.contains_key(page.url()) {
            return None;
        }

        let id = self.pages.len();
        self.index.insert(page.url().to_string(), id);
        self.pages.push(page);
        Some(id)
    }

    /// Looks a page up by its URL string
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.index.get(url).map(|&id| &self.pages[id])
    }

    /// Looks a page up by id
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id)
    }

    pub(crate) fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over pages in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}
