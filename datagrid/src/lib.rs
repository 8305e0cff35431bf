//! Tabular view-state engine for data grids.
//!
//! Turns an in-memory row collection into a filtered, sorted, paginated and
//! selectable view. Rendering is left to the caller: the grid exposes its
//! state and derived outputs, and accepts discrete events.
//!
//! The pipeline runs rows → filter → sort → paginate, with selection kept on
//! the side keyed by row id. Each stage is a pure function
//! ([`filter_rows`], [`sort_rows`], [`paginate`]) and [`Grid`] memoizes them
//! per state slice.

pub mod column;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod owner;
pub mod pagination;
pub mod row_id;
pub mod selection;
pub mod snapshot;
pub mod sort;
pub mod value;

pub use column::{Accessor, Column, GridRow};
pub use config::GridConfig;
pub use error::{ConfigError, GridError};
pub use event::GridEvent;
pub use filter::{FilterOptions, FilterState, MatchMode, filter_rows};
pub use grid::Grid;
pub use owner::Owner;
pub use pagination::{PageWindow, PaginationState, paginate};
pub use row_id::{RowId, RowIdResolver};
pub use selection::{HeaderSelection, Selection, SelectionManager};
pub use snapshot::{GridSnapshot, PageRow};
pub use sort::{SortDirection, SortState, sort_rows};
pub use value::{CellValue, SortKey};

pub mod prelude {
    pub use crate::column::{Accessor, Column, GridRow};
    pub use crate::config::GridConfig;
    pub use crate::event::GridEvent;
    pub use crate::filter::{FilterState, MatchMode};
    pub use crate::grid::Grid;
    pub use crate::pagination::{PageWindow, PaginationState};
    pub use crate::row_id::RowId;
    pub use crate::selection::HeaderSelection;
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::value::CellValue;
}
