//! Render output.

use crate::pagination::PageWindow;
use crate::selection::HeaderSelection;
use crate::sort::{SortDirection, SortState};

/// One row on the current page.
#[derive(Debug)]
pub struct PageRow<'a, T> {
    /// Position of the row in the data snapshot.
    pub index: usize,
    /// Row id.
    pub id: &'a str,
    /// The row itself.
    pub row: &'a T,
    /// Whether the row is selected.
    pub selected: bool,
}

impl<T> Clone for PageRow<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PageRow<'_, T> {}

/// Fully resolved view of a grid at one point in time.
#[derive(Debug)]
pub struct GridSnapshot<'a, T> {
    /// Rows on the current page.
    pub rows: Vec<PageRow<'a, T>>,
    /// Page window (clamped page, total pages, row range).
    pub window: PageWindow,
    /// Rows passing the filter, across all pages.
    pub visible_count: usize,
    /// Rows in the data snapshot.
    pub total_count: usize,
    /// Selected ids, including rows filtered out.
    pub selected_count: usize,
    /// Select-all checkbox state.
    pub header_selection: HeaderSelection,
    /// Active sort.
    pub sort: SortState,
    /// Whether selection checkboxes should be shown.
    pub row_selection_enabled: bool,
}

impl<T> GridSnapshot<'_, T> {
    /// Header sort indicator for a column.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort.direction_for(column_id)
    }

    /// Ids of the rows on the current page.
    pub fn page_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.id).collect()
    }
}
