//! Sort stage: stable ordering by zero or one column.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::column::{Column, GridRow, find_column};
use crate::value::SortKey;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort. `column_id = None` keeps the filtered order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortState {
    /// Column being sorted by.
    pub column_id: Option<String>,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl SortState {
    /// Unsorted state.
    pub fn none() -> Self {
        Self::default()
    }

    /// Ascending sort on a column.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: Some(column_id.into()),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on a column.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: Some(column_id.into()),
            direction: SortDirection::Desc,
        }
    }

    /// Returns `true` if a column is selected for sorting.
    pub fn is_active(&self) -> bool {
        self.column_id.is_some()
    }

    /// Direction shown on a column's header, if it is the active one.
    pub fn direction_for(&self, column_id: &str) -> Option<SortDirection> {
        match &self.column_id {
            Some(active) if active == column_id => Some(self.direction),
            _ => None,
        }
    }

    /// Next state after a header activation on `column_id`.
    ///
    /// The active column flips direction; any other column starts ascending.
    pub fn toggled(&self, column_id: &str) -> Self {
        match self.direction_for(column_id) {
            Some(direction) => Self {
                column_id: Some(column_id.to_string()),
                direction: direction.reversed(),
            },
            None => Self::asc(column_id),
        }
    }
}

/// Apply the sort stage to a list of row indices.
///
/// The ascending order comes from a stable sort, so rows with equal keys
/// keep their relative input order. Descending is the exact reverse of
/// ascending. An unset, unknown, unsortable or accessor-less column leaves
/// the input order untouched.
pub fn sort_rows<T: GridRow>(
    rows: &[T],
    indices: &[usize],
    columns: &[Column<T>],
    state: &SortState,
) -> Vec<usize> {
    let Some(column_id) = state.column_id.as_deref() else {
        return indices.to_vec();
    };
    let Some(column) = find_column(columns, column_id).filter(|c| c.can_sort()) else {
        trace!("sort on {} skipped: not a sortable column", column_id);
        return indices.to_vec();
    };

    let mut keyed: Vec<(SortKey, usize)> = indices
        .iter()
        .filter_map(|&index| rows.get(index).map(|row| (column.value(row).sort_key(), index)))
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut sorted: Vec<usize> = keyed.into_iter().map(|(_, index)| index).collect();
    if state.direction == SortDirection::Desc {
        sorted.reverse();
    }

    trace!("sorted {} rows by {} {:?}", sorted.len(), column_id, state.direction);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    struct Task {
        name: &'static str,
        tasks: i64,
    }

    impl GridRow for Task {
        fn field(&self, key: &str) -> CellValue {
            match key {
                "name" => CellValue::from(self.name),
                "tasks" => CellValue::from(self.tasks),
                _ => CellValue::Null,
            }
        }
    }

    fn rows() -> Vec<Task> {
        vec![
            Task { name: "Alpha", tasks: 10 },
            Task { name: "Beta", tasks: 10 },
            Task { name: "Gamma", tasks: 8 },
        ]
    }

    fn columns() -> Vec<Column<Task>> {
        vec![
            Column::new("name", "Name").field("name").sortable(),
            Column::new("tasks", "Tasks").field("tasks").sortable(),
            Column::new("raw", "Raw").field("tasks"),
        ]
    }

    #[test]
    fn test_toggle_policy() {
        let state = SortState::none().toggled("name");
        assert_eq!(state, SortState::asc("name"));

        let state = state.toggled("name");
        assert_eq!(state, SortState::desc("name"));

        let state = state.toggled("tasks");
        assert_eq!(state, SortState::asc("tasks"));
    }

    #[test]
    fn test_direction_for() {
        let state = SortState::desc("name");
        assert_eq!(state.direction_for("name"), Some(SortDirection::Desc));
        assert_eq!(state.direction_for("tasks"), None);
    }

    #[test]
    fn test_unsortable_column_is_noop() {
        let sorted = sort_rows(&rows(), &[2, 0, 1], &columns(), &SortState::asc("raw"));
        assert_eq!(sorted, vec![2, 0, 1]);
    }

    #[test]
    fn test_unknown_column_is_noop() {
        let sorted = sort_rows(&rows(), &[1, 2, 0], &columns(), &SortState::asc("missing"));
        assert_eq!(sorted, vec![1, 2, 0]);
    }

    #[test]
    fn test_stable_ascending() {
        let sorted = sort_rows(&rows(), &[0, 1, 2], &columns(), &SortState::asc("tasks"));
        assert_eq!(sorted, vec![2, 0, 1]);
    }

    #[test]
    fn test_descending_is_reverse() {
        let sorted = sort_rows(&rows(), &[0, 1, 2], &columns(), &SortState::desc("tasks"));
        assert_eq!(sorted, vec![1, 0, 2]);
    }
}
