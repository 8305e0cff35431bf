//! Pagination stage.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Requested page and page size.
///
/// `page` is 1-based. Neither field is trusted: [`paginate`] clamps the page
/// into range and treats a zero page size as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationState {
    /// Requested page (1-based).
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

impl PaginationState {
    /// First page with the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Set the requested page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Page size, never below 1.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

/// Resolved window over the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    /// Clamped current page (1-based).
    pub page: usize,
    /// Effective rows per page.
    pub page_size: usize,
    /// Total page count, at least 1.
    pub total_pages: usize,
    /// Number of rows being paged.
    pub total_rows: usize,
    /// First row index of the page (inclusive).
    pub start: usize,
    /// Last row index of the page (exclusive).
    pub end: usize,
}

impl PageWindow {
    /// Index range of the page within the visible rows.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of rows on this page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// 1-based inclusive row range for "showing X-Y of N" labels.
    ///
    /// `None` when there are no rows.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            None
        } else {
            Some((self.start + 1, self.end))
        }
    }
}

/// Number of pages needed for `total_rows`, at least 1.
pub fn total_pages(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Window `total_rows` rows according to `state`.
pub fn paginate(total_rows: usize, state: &PaginationState) -> PageWindow {
    let page_size = state.effective_page_size();
    let total_pages = total_pages(total_rows, page_size);
    let page = clamp_page(state.page, total_pages);

    let start = ((page - 1) * page_size).min(total_rows);
    let end = (start + page_size).min(total_rows);

    PageWindow {
        page,
        page_size,
        total_pages,
        total_rows,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_one_page() {
        let window = paginate(0, &PaginationState::new(10));
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.page, 1);
        assert!(window.is_empty());
        assert_eq!(window.display_range(), None);
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let state = PaginationState {
            page: 2,
            page_size: 0,
        };
        let window = paginate(3, &state);
        assert_eq!(window.page_size, 1);
        assert_eq!(window.total_pages, 3);
        assert_eq!(window.range(), 1..2);
    }

    #[test]
    fn test_page_clamped() {
        let window = paginate(5, &PaginationState::new(2).with_page(9));
        assert_eq!(window.page, 3);
        assert_eq!(window.range(), 4..5);

        let window = paginate(5, &PaginationState::new(2).with_page(0));
        assert_eq!(window.page, 1);
        assert_eq!(window.range(), 0..2);
    }

    #[test]
    fn test_display_range() {
        let window = paginate(25, &PaginationState::new(10).with_page(3));
        assert_eq!(window.display_range(), Some((21, 25)));
        assert!(window.has_prev());
        assert!(!window.has_next());
    }
}
