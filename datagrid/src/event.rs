//! Discrete events a presentation layer feeds into a grid.

use serde::{Deserialize, Serialize};

use crate::row_id::RowId;
use crate::sort::SortDirection;

/// A state-changing event, applied with [`Grid::dispatch`](crate::Grid::dispatch).
///
/// Data replacement is not an event variant since it carries rows; use
/// [`Grid::set_data`](crate::Grid::set_data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    /// Global search text edited.
    SetQuery { query: String },
    /// Per-column filter text edited. Empty text removes the filter.
    SetColumnFilter { column_id: String, text: String },
    /// Query and column filters cleared.
    ClearFilters,
    /// Header activated.
    ToggleSort { column_id: String },
    /// Explicit sort chosen.
    SortBy {
        column_id: String,
        direction: SortDirection,
    },
    /// Sort removed.
    ClearSort,
    /// Jump to a page.
    GoToPage { page: usize },
    /// Next page.
    NextPage,
    /// Previous page.
    PrevPage,
    /// First page.
    FirstPage,
    /// Last page.
    LastPage,
    /// Page size picked.
    SetPageSize { page_size: usize },
    /// Row checkbox toggled.
    ToggleRow { id: RowId },
    /// Header checkbox toggled.
    ToggleSelectAll,
    /// Selection cleared.
    ClearSelection,
}
