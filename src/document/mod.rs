//! Document model: an ordered list of pages with an active cursor

mod page;
mod style;

pub use page::{Page, TextStats};
pub use style::StyleSnapshot;

use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

/// Pages shown in full before the indicator condenses
pub const MAX_INDICATOR_DOTS: usize = 10;

/// Dots in the condensed indicator window
const CONDENSED_DOTS: usize = 9;

/// Dots kept before the active page in the condensed window
const DOTS_BEFORE_ACTIVE: usize = 4;

/// Page list errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Cannot delete the last page")]
    CannotDeleteLastPage,

    #[error("Page {index} out of range (document has {len} pages)")]
    PageOutOfRange { index: usize, len: usize },
}

/// Visible window of page indicator dots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageIndicator {
    /// Page indices with a dot, in order
    pub dots: SmallVec<[usize; MAX_INDICATOR_DOTS]>,
    pub active: usize,
    /// More pages follow the last dot
    pub truncated: bool,
}

/// The ordered pages plus the active page index.
///
/// Always holds at least one page, and the active index always points at
/// one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pages: Vec<Page>,
    active: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(StyleSnapshot::default())
    }
}

impl Document {
    /// Create a document with one empty page
    pub fn new(style: StyleSnapshot) -> Self {
        Self {
            pages: vec![Page::new(style)],
            active: 0,
        }
    }

    /// Create a document from existing pages; an empty list gets one blank page
    pub fn from_pages(pages: Vec<Page>) -> Self {
        if pages.is_empty() {
            return Self::default();
        }
        Self { pages, active: 0 }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Get page count (never zero)
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_page(&self) -> &Page {
        &self.pages[self.active]
    }

    pub fn active_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.active]
    }

    /// Replace the active page's text and style snapshot
    pub fn set_active_text(&mut self, text: impl Into<String>, style: &StyleSnapshot) {
        let page = self.active_page_mut();
        page.text = text.into();
        page.style = style.clone();
    }

    /// Append an empty page and make it active. Returns its index.
    pub fn add_page(&mut self, style: StyleSnapshot) -> usize {
        self.pages.push(Page::new(style));
        self.active = self.pages.len() - 1;
        self.active
    }

    /// Delete the active page. Returns the new active index.
    pub fn delete_active_page(&mut self) -> Result<usize, DocumentError> {
        if self.pages.len() <= 1 {
            return Err(DocumentError::CannotDeleteLastPage);
        }

        self.pages.remove(self.active);
        if self.active >= self.pages.len() {
            self.active = self.pages.len() - 1;
        }
        Ok(self.active)
    }

    /// Move to the previous page, if any
    pub fn previous_page(&mut self) -> bool {
        if self.active > 0 {
            self.active -= 1;
            true
        } else {
            false
        }
    }

    /// Move to the next page, if any
    pub fn next_page(&mut self) -> bool {
        if self.active + 1 < self.pages.len() {
            self.active += 1;
            true
        } else {
            false
        }
    }

    /// Make `index` the active page. `Ok(false)` if it already was.
    pub fn switch_to(&mut self, index: usize) -> Result<bool, DocumentError> {
        if index >= self.pages.len() {
            return Err(DocumentError::PageOutOfRange {
                index,
                len: self.pages.len(),
            });
        }
        if index == self.active {
            return Ok(false);
        }
        self.active = index;
        Ok(true)
    }

    /// Text of pages from `index` onward, joined by `separator`
    pub fn text_from(&self, index: usize, separator: &str) -> String {
        self.pages
            .iter()
            .skip(index)
            .map(|page| page.text.as_str())
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Replace every page from `index` onward with `pages`.
    ///
    /// An empty replacement leaves one empty page at `index` so the page
    /// list never shrinks below the active page.
    pub fn replace_from(&mut self, index: usize, pages: Vec<Page>, style: &StyleSnapshot) {
        let index = index.min(self.pages.len());
        self.pages.truncate(index);

        if pages.is_empty() {
            self.pages.push(Page::new(style.clone()));
        } else {
            self.pages.extend(pages);
        }

        if self.active >= self.pages.len() {
            self.active = self.pages.len() - 1;
        }
    }

    /// Copy `style` into every page's snapshot
    pub fn apply_style_to_all(&mut self, style: &StyleSnapshot) {
        for page in &mut self.pages {
            page.style = style.clone();
        }
    }

    /// Any page has non-whitespace text
    pub fn has_content(&self) -> bool {
        self.pages.iter().any(Page::has_content)
    }

    /// Pages worth exporting, with their 1-based page numbers
    pub fn exportable_pages(&self) -> Vec<(usize, &Page)> {
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.has_content())
            .map(|(index, page)| (index + 1, page))
            .collect()
    }

    /// Which page dots to show around the active page
    pub fn indicator(&self) -> PageIndicator {
        let total = self.pages.len();

        let (start, end) = if total <= MAX_INDICATOR_DOTS {
            (0, total)
        } else {
            let start = self.active.saturating_sub(DOTS_BEFORE_ACTIVE);
            (start, total.min(start + CONDENSED_DOTS))
        };

        PageIndicator {
            dots: (start..end).collect(),
            active: self.active,
            truncated: end < total,
        }
    }
}
