//! The grid: data, columns and view state wired into one memoized pipeline.
//!
//! Every event replaces one state slice and drops only the cached stages
//! downstream of it:
//!
//! | Change                  | Recomputed                |
//! |-------------------------|---------------------------|
//! | data                    | ids, filter, sort, window |
//! | columns, filter         | filter, sort, window      |
//! | sort                    | sort, window              |
//! | page, page size         | window                    |
//! | selection               | nothing                   |

use std::cell::OnceCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::column::{Column, GridRow, find_column};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::event::GridEvent;
use crate::filter::{FilterState, filter_rows};
use crate::owner::Owner;
use crate::pagination::{PageWindow, PaginationState, clamp_page, paginate};
use crate::row_id::{RowId, RowIdResolver};
use crate::selection::{HeaderSelection, SelectionManager};
use crate::snapshot::{GridSnapshot, PageRow};
use crate::sort::{SortDirection, SortState, sort_rows};

/// Memoized pipeline stages.
#[derive(Debug, Default)]
struct PipelineCache {
    /// Row ids, parallel to the data.
    ids: OnceCell<Vec<RowId>>,
    /// Indices passing the filter, in data order.
    filtered: OnceCell<Vec<usize>>,
    /// Filtered indices in sort order.
    visible: OnceCell<Vec<usize>>,
    /// Ids of the visible rows, in sort order.
    visible_ids: OnceCell<Vec<RowId>>,
}

impl PipelineCache {
    fn invalidate_data(&mut self) {
        self.ids.take();
        self.invalidate_filter();
    }

    fn invalidate_filter(&mut self) {
        self.filtered.take();
        self.invalidate_sort();
    }

    fn invalidate_sort(&mut self) {
        self.visible.take();
        self.visible_ids.take();
    }
}

/// Filtered, sorted, paginated and selectable view over in-memory rows.
///
/// # Example
///
/// ```
/// use datagrid::{CellValue, Column, Grid, GridConfig, GridRow};
///
/// struct User {
///     name: &'static str,
///     tasks: i64,
/// }
///
/// impl GridRow for User {
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "name" => CellValue::from(self.name),
///             "tasks" => CellValue::from(self.tasks),
///             _ => CellValue::Null,
///         }
///     }
/// }
///
/// let mut grid = Grid::new(
///     vec![
///         Column::new("name", "Name").field("name").sortable(),
///         Column::new("tasks", "Tasks").field("tasks").sortable(),
///     ],
///     GridConfig::default().with_default_page_size(2),
/// )
/// .with_data(vec![
///     User { name: "Alpha", tasks: 10 },
///     User { name: "Beta", tasks: 10 },
///     User { name: "Gamma", tasks: 8 },
/// ]);
///
/// grid.toggle_sort("tasks");
/// let names: Vec<_> = grid.page_rows().iter().map(|u| u.name).collect();
/// assert_eq!(names, vec!["Gamma", "Alpha"]);
/// assert_eq!(grid.total_pages(), 2);
/// ```
pub struct Grid<T> {
    data: Arc<[T]>,
    columns: Vec<Column<T>>,
    config: GridConfig,
    row_id: RowIdResolver<T>,
    filter: FilterState,
    sort: SortState,
    pagination: Owner<PaginationState>,
    selection: SelectionManager,
    cache: PipelineCache,
    dirty: bool,
}

impl<T: GridRow> Grid<T> {
    /// Create an empty grid.
    ///
    /// Invalid configuration values are corrected and logged. Use
    /// [`try_new`](Grid::try_new) to reject them instead.
    pub fn new(columns: Vec<Column<T>>, config: GridConfig) -> Self {
        if let Err(e) = GridConfig::validate_columns(&columns) {
            warn!("{}", e);
        }
        let config = config.sanitized();
        let pagination = PaginationState::new(config.default_page_size);
        let selection = SelectionManager::new().with_enabled(config.row_selection_enabled);

        Self {
            data: Arc::from(Vec::new()),
            columns,
            config,
            row_id: RowIdResolver::default(),
            filter: FilterState::default(),
            sort: SortState::default(),
            pagination: Owner::owned(pagination),
            selection,
            cache: PipelineCache::default(),
            dirty: false,
        }
    }

    /// Create an empty grid, rejecting invalid configuration.
    pub fn try_new(columns: Vec<Column<T>>, config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        GridConfig::validate_columns(&columns)?;
        Ok(Self::new(columns, config))
    }

    /// Set the initial rows.
    pub fn with_data(mut self, data: impl Into<Arc<[T]>>) -> Self {
        self.set_data(data);
        self.dirty = false;
        self
    }

    /// Identify rows with a caller-supplied function instead of their index.
    pub fn with_row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> RowId + Send + Sync + 'static,
    {
        self.row_id = RowIdResolver::custom(f);
        self.cache.invalidate_data();
        self
    }

    /// Let the caller own the selection.
    ///
    /// `on_change` receives every proposed selection; the grid keeps showing
    /// `ids` until [`sync_selected_ids`](Grid::sync_selected_ids) is called.
    pub fn with_controlled_selection<I, S, F>(mut self, ids: I, on_change: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RowId>,
        F: FnMut(Vec<RowId>) + Send + 'static,
    {
        self.selection = SelectionManager::controlled(ids, on_change)
            .with_enabled(self.config.row_selection_enabled);
        self
    }

    /// Let the caller own the page and page size.
    ///
    /// `on_change` receives every proposed state; the grid keeps using
    /// `state` until [`sync_pagination`](Grid::sync_pagination) is called.
    pub fn with_controlled_pagination<F>(mut self, state: PaginationState, on_change: F) -> Self
    where
        F: FnMut(&PaginationState) + Send + 'static,
    {
        self.pagination = Owner::external(state, on_change);
        self
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Current data snapshot.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Column definitions.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Effective configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Page sizes offered to the user.
    pub fn page_size_options(&self) -> &[usize] {
        &self.config.page_size_options
    }

    /// Current filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Current sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Requested pagination state, before clamping.
    pub fn pagination_state(&self) -> &PaginationState {
        self.pagination.get()
    }

    /// Selection manager, for read access.
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// Returns `true` if state changed since the last [`clear_dirty`](Grid::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // -------------------------------------------------------------------------
    // Derived outputs
    // -------------------------------------------------------------------------

    /// Ids of all rows, parallel to [`data`](Grid::data).
    pub fn row_ids(&self) -> &[RowId] {
        self.cache.ids.get_or_init(|| {
            trace!("resolving ids for {} rows", self.data.len());
            self.row_id.resolve_all(&self.data)
        })
    }

    fn filtered_indices(&self) -> &[usize] {
        self.cache.filtered.get_or_init(|| {
            filter_rows(
                &self.data,
                &self.columns,
                &self.filter,
                self.config.filter_options(),
            )
        })
    }

    /// Indices into [`data`](Grid::data) of the filtered rows, in sort order.
    pub fn visible_indices(&self) -> &[usize] {
        self.cache
            .visible
            .get_or_init(|| sort_rows(&self.data, self.filtered_indices(), &self.columns, &self.sort))
    }

    /// Filtered and sorted rows across all pages.
    pub fn visible_rows(&self) -> Vec<&T> {
        self.visible_indices()
            .iter()
            .map(|&index| &self.data[index])
            .collect()
    }

    /// Ids of the visible rows, in sort order. This is the select-all scope.
    pub fn visible_ids(&self) -> &[RowId] {
        self.cache.visible_ids.get_or_init(|| {
            let ids = self.row_ids();
            self.visible_indices()
                .iter()
                .map(|&index| ids[index].clone())
                .collect()
        })
    }

    /// Number of visible rows.
    pub fn visible_count(&self) -> usize {
        self.visible_indices().len()
    }

    /// Number of rows in the data snapshot.
    pub fn total_count(&self) -> usize {
        self.data.len()
    }

    /// Current page window, clamped against the visible rows.
    pub fn window(&self) -> PageWindow {
        paginate(self.visible_count(), self.pagination.get())
    }

    /// Current page, clamped into `[1, total_pages]`.
    pub fn page(&self) -> usize {
        self.window().page
    }

    /// Effective page size.
    pub fn page_size(&self) -> usize {
        self.pagination.get().effective_page_size()
    }

    /// Total page count, at least 1.
    pub fn total_pages(&self) -> usize {
        self.window().total_pages
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        self.visible_indices()[self.window().range()]
            .iter()
            .map(|&index| &self.data[index])
            .collect()
    }

    /// Rows on the current page with their ids and selection flags.
    pub fn page_entries(&self) -> Vec<PageRow<'_, T>> {
        let ids = self.row_ids();
        self.visible_indices()[self.window().range()]
            .iter()
            .map(|&index| {
                let id = ids[index].as_str();
                PageRow {
                    index,
                    id,
                    row: &self.data[index],
                    selected: self.selection.is_selected(id),
                }
            })
            .collect()
    }

    /// Header sort indicator for a column.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort.direction_for(column_id)
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Number of selected rows, including rows currently filtered out.
    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selection.selected_ids()
    }

    /// Select-all checkbox state against the visible rows.
    pub fn header_selection(&self) -> HeaderSelection {
        self.selection.header_state(self.visible_ids())
    }

    /// Everything a presentation layer needs to draw the grid.
    pub fn snapshot(&self) -> GridSnapshot<'_, T> {
        GridSnapshot {
            rows: self.page_entries(),
            window: self.window(),
            visible_count: self.visible_count(),
            total_count: self.total_count(),
            selected_count: self.selected_count(),
            header_selection: self.header_selection(),
            sort: self.sort.clone(),
            row_selection_enabled: self.selection.is_enabled(),
        }
    }

    // -------------------------------------------------------------------------
    // Data and columns
    // -------------------------------------------------------------------------

    /// Replace the data snapshot.
    ///
    /// The page is clamped into the new bounds but not reset, and the
    /// selection is kept.
    pub fn set_data(&mut self, data: impl Into<Arc<[T]>>) {
        self.data = data.into();
        debug!("data replaced with {} rows", self.data.len());
        self.cache.invalidate_data();
        self.clamp_stored_page();
        self.dirty = true;
    }

    /// Replace the column definitions.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        if let Err(e) = GridConfig::validate_columns(&columns) {
            warn!("{}", e);
        }
        debug!("columns replaced ({} columns)", columns.len());
        self.columns = columns;
        self.cache.invalidate_filter();
        self.clamp_stored_page();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Edit the global query. Returns to page 1.
    pub fn set_global_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.filter.global_query {
            return;
        }
        debug!("global query set to {:?}", query);
        self.filter.global_query = query;
        self.filter_changed();
    }

    /// Edit a column filter. Empty text removes it. Returns to page 1.
    pub fn set_column_filter(&mut self, column_id: impl Into<String>, text: impl Into<String>) {
        let column_id = column_id.into();
        let text = text.into();
        if self.filter.column_filter(&column_id).unwrap_or("") == text {
            return;
        }
        debug!("column filter {} set to {:?}", column_id, text);
        if text.is_empty() {
            self.filter.per_column.remove(&column_id);
        } else {
            self.filter.per_column.insert(column_id, text);
        }
        self.filter_changed();
    }

    /// Replace the whole filter state. Returns to page 1.
    pub fn set_filter_state(&mut self, state: FilterState) {
        if state == self.filter {
            return;
        }
        debug!("filter state replaced");
        self.filter = state;
        self.filter_changed();
    }

    /// Clear the query and every column filter. Returns to page 1.
    pub fn clear_filters(&mut self) {
        self.set_filter_state(FilterState::default());
    }

    fn filter_changed(&mut self) {
        self.cache.invalidate_filter();
        self.reset_page();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Header activation on a column.
    ///
    /// An inactive column sorts ascending; the active column flips direction.
    /// Unknown or unsortable columns are ignored. Returns the new sort state
    /// if it changed.
    pub fn toggle_sort(&mut self, column_id: &str) -> Option<SortState> {
        if !self.is_sortable(column_id) {
            debug!("toggle_sort on {} ignored: not a sortable column", column_id);
            return None;
        }
        let next = self.sort.toggled(column_id);
        self.apply_sort(next.clone());
        Some(next)
    }

    /// Sort by a column in a given direction. Unknown or unsortable columns
    /// are ignored.
    pub fn sort_by(&mut self, column_id: &str, direction: SortDirection) {
        if let Err(e) = self.try_sort_by(column_id, direction) {
            debug!("sort_by ignored: {}", e);
        }
    }

    /// Sort by a column in a given direction, rejecting unusable columns.
    pub fn try_sort_by(&mut self, column_id: &str, direction: SortDirection) -> Result<(), GridError> {
        let column = find_column(&self.columns, column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))?;
        if !column.can_sort() {
            return Err(GridError::ColumnNotSortable(column_id.to_string()));
        }
        self.apply_sort(SortState {
            column_id: Some(column_id.to_string()),
            direction,
        });
        Ok(())
    }

    /// Return to the filtered order.
    pub fn clear_sort(&mut self) {
        self.apply_sort(SortState::none());
    }

    fn is_sortable(&self, column_id: &str) -> bool {
        find_column(&self.columns, column_id).is_some_and(|c| c.can_sort())
    }

    fn apply_sort(&mut self, next: SortState) {
        if next == self.sort {
            return;
        }
        debug!("sort set to {:?} {:?}", next.column_id, next.direction);
        self.sort = next;
        self.cache.invalidate_sort();
        self.reset_page();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Go to a page. Out-of-range pages are clamped.
    pub fn set_page(&mut self, page: usize) {
        let page = clamp_page(page, self.total_pages());
        debug!("go to page {}", page);
        self.update_pagination(|state| state.page = page);
    }

    /// Go to the next page, if any.
    pub fn next_page(&mut self) {
        self.set_page(self.page().saturating_add(1));
    }

    /// Go to the previous page, if any.
    pub fn prev_page(&mut self) {
        self.set_page(self.page().saturating_sub(1));
    }

    /// Go to the first page.
    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    /// Go to the last page.
    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    /// Returns `true` if there is a page after the current one.
    pub fn has_next_page(&self) -> bool {
        self.window().has_next()
    }

    /// Returns `true` if there is a page before the current one.
    pub fn has_prev_page(&self) -> bool {
        self.window().has_prev()
    }

    /// Change the page size and return to page 1. Zero is treated as 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        if let Err(e) = self.try_set_page_size(page_size) {
            warn!("{}, using 1", e);
            self.apply_page_size(1);
        }
    }

    /// Change the page size and return to page 1, rejecting zero.
    pub fn try_set_page_size(&mut self, page_size: usize) -> Result<(), GridError> {
        if page_size == 0 {
            return Err(GridError::InvalidPageSize(page_size));
        }
        if !self.config.page_size_options.contains(&page_size) {
            debug!("page size {} is not one of the offered options", page_size);
        }
        self.apply_page_size(page_size);
        Ok(())
    }

    fn apply_page_size(&mut self, page_size: usize) {
        debug!("page size set to {}", page_size);
        self.update_pagination(|state| {
            state.page_size = page_size;
            state.page = 1;
        });
    }

    /// Mirror pagination handed in by the owner of controlled pagination.
    pub fn sync_pagination(&mut self, state: PaginationState) {
        if *self.pagination.get() == state {
            return;
        }
        self.pagination.sync(state);
        self.dirty = true;
    }

    fn reset_page(&mut self) {
        self.update_pagination(|state| state.page = 1);
    }

    /// Pull the stored page back into range after the visible set changed.
    fn clamp_stored_page(&mut self) {
        let page = self.page();
        if page != self.pagination.get().page {
            trace!("clamping stored page {} to {}", self.pagination.get().page, page);
            self.update_pagination(|state| state.page = page);
        }
    }

    fn update_pagination<F>(&mut self, f: F)
    where
        F: FnOnce(&mut PaginationState),
    {
        let mut next = *self.pagination.get();
        f(&mut next);
        if next != *self.pagination.get() {
            self.pagination.set(next);
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Flip selection of one row.
    pub fn toggle_row(&mut self, id: &str) {
        if self.selection.toggle_row(id) {
            self.dirty = true;
        }
    }

    /// Select-all over every visible row, across all pages.
    ///
    /// Removes exactly the visible ids when they are all selected, adds them
    /// otherwise.
    pub fn toggle_select_all_visible(&mut self) {
        let visible = self.visible_ids().to_vec();
        if self.selection.toggle_all(&visible) {
            self.dirty = true;
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.dirty = true;
        }
    }

    /// Mirror ids handed in by the owner of a controlled selection.
    pub fn sync_selected_ids<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<RowId>,
    {
        if self.selection.sync(ids) {
            self.dirty = true;
        }
    }

    /// Drop selected ids that no longer belong to any row in the data.
    ///
    /// Ids of rows that are merely filtered out are kept.
    pub fn prune_selection_to_data(&mut self) {
        let ids = self
            .cache
            .ids
            .get_or_init(|| self.row_id.resolve_all(&self.data));
        let present: HashSet<&str> = ids.iter().map(String::as_str).collect();
        if self.selection.prune(|id| present.contains(id)) {
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Apply an event.
    pub fn dispatch(&mut self, event: GridEvent) {
        trace!("dispatch {:?}", event);
        match event {
            GridEvent::SetQuery { query } => self.set_global_query(query),
            GridEvent::SetColumnFilter { column_id, text } => self.set_column_filter(column_id, text),
            GridEvent::ClearFilters => self.clear_filters(),
            GridEvent::ToggleSort { column_id } => {
                self.toggle_sort(&column_id);
            }
            GridEvent::SortBy {
                column_id,
                direction,
            } => self.sort_by(&column_id, direction),
            GridEvent::ClearSort => self.clear_sort(),
            GridEvent::GoToPage { page } => self.set_page(page),
            GridEvent::NextPage => self.next_page(),
            GridEvent::PrevPage => self.prev_page(),
            GridEvent::FirstPage => self.first_page(),
            GridEvent::LastPage => self.last_page(),
            GridEvent::SetPageSize { page_size } => self.set_page_size(page_size),
            GridEvent::ToggleRow { id } => self.toggle_row(&id),
            GridEvent::ToggleSelectAll => self.toggle_select_all_visible(),
            GridEvent::ClearSelection => self.clear_selection(),
        }
    }
}

impl<T> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("filter", &self.filter)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
