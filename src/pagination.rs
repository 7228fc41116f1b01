//! Pagination Module
//!
//! Page arithmetic and the page-number strip for the feedback list.

use std::ops::Range;

use serde::Serialize;

use crate::error::{JujurlyError, Result};

/// Pages shown on each side of the current page in the strip.
const STRIP_DELTA: usize = 2;

// == Page Item ==
/// One slot of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

// == Paginator ==
/// 1-based page cursor over a list of `total_items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    /// Creates a paginator positioned on page 1.
    pub fn new(total_items: usize, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(JujurlyError::InvalidConfig(
                "page size must be positive".to_string(),
            ));
        }
        Ok(Self {
            total_items,
            page_size,
            current_page: 1,
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    // == Navigation ==
    /// Jumps to `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.last_valid_page());
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous_page() {
            self.current_page -= 1;
        }
    }

    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    pub fn last_page(&mut self) {
        self.current_page = self.last_valid_page();
    }

    /// Updates the item count and pulls the cursor back into range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.go_to_page(self.current_page);
    }

    // == Item Range ==
    /// Half-open index range of the items on the current page.
    pub fn item_range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    // == Page Numbers ==
    /// Page-number strip: first page, pages around the current one, last page,
    /// with ellipses over the gaps.
    pub fn page_numbers(&self) -> Vec<PageItem> {
        let total = self.total_pages();
        let current = self.current_page;
        let mut strip = vec![PageItem::Page(1)];

        if current.saturating_sub(STRIP_DELTA) > 2 {
            strip.push(PageItem::Ellipsis);
        }

        let low = current.saturating_sub(STRIP_DELTA).max(2);
        let high = (current + STRIP_DELTA).min(total.saturating_sub(1));
        strip.extend((low..=high).map(PageItem::Page));

        if current + STRIP_DELTA + 1 < total {
            strip.push(PageItem::Ellipsis);
            strip.push(PageItem::Page(total));
        } else if total > 1 {
            strip.push(PageItem::Page(total));
        }

        dedup_pages(strip)
    }

    fn last_valid_page(&self) -> usize {
        self.total_pages().max(1)
    }
}

/// Drops repeated page numbers, keeping every ellipsis.
fn dedup_pages(strip: Vec<PageItem>) -> Vec<PageItem> {
    let mut seen = Vec::with_capacity(strip.len());
    strip
        .into_iter()
        .filter(|item| match item {
            PageItem::Page(page) if seen.contains(page) => false,
            PageItem::Page(page) => {
                seen.push(*page);
                true
            }
            PageItem::Ellipsis => true,
        })
        .collect()
}
