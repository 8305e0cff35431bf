//! Row selection keyed by row id.
//!
//! Selection uses string ids so it stays stable while rows are filtered,
//! sorted, paged or replaced.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::owner::Owner;
use crate::row_id::RowId;

/// Set of selected row ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    selected: HashSet<RowId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection from ids. Duplicates collapse.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RowId>,
    {
        Self {
            selected: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Flip membership of an ID.
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Select all of the given IDs.
    pub fn select_all(&mut self, ids: &[RowId]) {
        self.selected.extend(ids.iter().cloned());
    }

    /// Deselect exactly the given IDs, leaving others untouched.
    pub fn deselect_all(&mut self, ids: &[RowId]) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Keep only the IDs for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.selected.retain(|id| keep(id));
    }

    /// Header checkbox state for the given visible IDs.
    pub fn header_state(&self, visible: &[RowId]) -> HeaderSelection {
        let selected = visible.iter().filter(|id| self.is_selected(id)).count();
        if selected == 0 {
            HeaderSelection::None
        } else if selected == visible.len() {
            HeaderSelection::All
        } else {
            HeaderSelection::Some
        }
    }
}

/// Select-all checkbox state, computed against the visible rows.
///
/// `Some` is what a presentation layer renders as "indeterminate".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderSelection {
    /// No visible row is selected (or nothing is visible).
    #[default]
    None,
    /// Some, but not all, visible rows are selected.
    Some,
    /// Every visible row is selected.
    All,
}

impl HeaderSelection {
    /// Whether the header checkbox shows as checked.
    pub fn is_checked(self) -> bool {
        self == HeaderSelection::All
    }

    /// Whether the header checkbox shows as indeterminate.
    pub fn is_indeterminate(self) -> bool {
        self == HeaderSelection::Some
    }
}

/// Selection with owned or controlled storage.
///
/// Every write goes through [`Owner::set`], so in controlled mode the
/// proposed selection is reported to the caller and the mirrored ids only
/// change on [`sync`](SelectionManager::sync).
#[derive(Debug)]
pub struct SelectionManager {
    owner: Owner<Selection>,
    enabled: bool,
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionManager {
    /// Internally owned, initially empty selection.
    pub fn new() -> Self {
        Self {
            owner: Owner::owned(Selection::new()),
            enabled: true,
        }
    }

    /// Controlled selection mirroring `ids`.
    ///
    /// `on_change` receives the proposed ids, sorted.
    pub fn controlled<I, S, F>(ids: I, mut on_change: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RowId>,
        F: FnMut(Vec<RowId>) + Send + 'static,
    {
        Self {
            owner: Owner::external(Selection::from_ids(ids), move |next: &Selection| {
                on_change(next.selected())
            }),
            enabled: true,
        }
    }

    /// Enable or disable selection writes.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Enable or disable selection writes.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether selection writes are accepted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if the caller owns the selection.
    pub fn is_controlled(&self) -> bool {
        self.owner.is_controlled()
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        self.owner.get()
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection().is_selected(id)
    }

    /// Number of selected ids, including rows currently filtered out.
    pub fn selected_count(&self) -> usize {
        self.selection().len()
    }

    /// Selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.selection().selected()
    }

    /// Header checkbox state for the visible ids.
    pub fn header_state(&self, visible: &[RowId]) -> HeaderSelection {
        self.selection().header_state(visible)
    }

    /// Flip membership of one row. Returns `true` if a change was made or
    /// proposed.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        if !self.enabled {
            debug!("selection disabled, ignoring toggle of {}", id);
            return false;
        }
        debug!("toggle row {}", id);
        self.owner.update(|selection| selection.toggle(id));
        true
    }

    /// Select-all over the visible ids.
    ///
    /// If every visible id is already selected, exactly those ids are
    /// removed. Otherwise all of them are added. Ids outside `visible` are
    /// never touched. Returns `true` if a change was made or proposed.
    pub fn toggle_all(&mut self, visible: &[RowId]) -> bool {
        if !self.enabled {
            debug!("selection disabled, ignoring select-all");
            return false;
        }
        if visible.is_empty() {
            return false;
        }

        let all_selected = self.header_state(visible) == HeaderSelection::All;
        debug!(
            "select-all over {} visible rows ({})",
            visible.len(),
            if all_selected { "deselect" } else { "select" }
        );
        self.owner.update(|selection| {
            if all_selected {
                selection.deselect_all(visible);
            } else {
                selection.select_all(visible);
            }
        });
        true
    }

    /// Deselect everything. Returns `true` if a change was made or proposed.
    pub fn clear(&mut self) -> bool {
        if !self.enabled {
            debug!("selection disabled, ignoring clear");
            return false;
        }
        if self.selection().is_empty() {
            return false;
        }
        debug!("clear selection");
        self.owner.update(Selection::clear);
        true
    }

    /// Drop ids that `keep` rejects. Returns `true` if a change was made or
    /// proposed.
    pub fn prune<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        if !self.enabled {
            debug!("selection disabled, ignoring prune");
            return false;
        }
        let stale = self
            .selection()
            .selected()
            .into_iter()
            .filter(|id| !keep(id))
            .count();
        if stale == 0 {
            return false;
        }
        debug!("pruning {} stale selected ids", stale);
        self.owner.update(|selection| selection.retain(keep));
        true
    }

    /// Mirror ids handed in by the owner of a controlled selection.
    /// Returns `true` if the mirrored ids changed.
    pub fn sync<I, S>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<RowId>,
    {
        let next = Selection::from_ids(ids);
        if next == *self.selection() {
            return false;
        }
        self.owner.sync(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<RowId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        selection.toggle("a");
        assert!(selection.is_selected("a"));
        selection.toggle("a");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_header_state() {
        let selection = Selection::from_ids(["a", "b"]);
        assert_eq!(selection.header_state(&ids(&["a", "b"])), HeaderSelection::All);
        assert_eq!(selection.header_state(&ids(&["a", "c"])), HeaderSelection::Some);
        assert_eq!(selection.header_state(&ids(&["c"])), HeaderSelection::None);
        assert_eq!(selection.header_state(&[]), HeaderSelection::None);
    }

    #[test]
    fn test_deselect_all_leaves_other_ids() {
        let mut selection = Selection::from_ids(["a", "b", "z"]);
        selection.deselect_all(&ids(&["a", "b", "c"]));
        assert_eq!(selection.selected(), ids(&["z"]));
    }

    #[test]
    fn test_toggle_all_adds_missing_then_removes() {
        let mut manager = SelectionManager::new();
        manager.toggle_row("a");
        let visible = ids(&["a", "b"]);

        manager.toggle_all(&visible);
        assert_eq!(manager.selected_ids(), ids(&["a", "b"]));

        manager.toggle_all(&visible);
        assert_eq!(manager.selected_count(), 0);
    }

    #[test]
    fn test_toggle_all_with_nothing_visible() {
        let mut manager = SelectionManager::new();
        manager.toggle_row("a");
        assert!(!manager.toggle_all(&[]));
        assert_eq!(manager.selected_ids(), ids(&["a"]));
    }

    #[test]
    fn test_disabled_ignores_writes() {
        let mut manager = SelectionManager::new();
        manager.toggle_row("a");
        manager.set_enabled(false);

        assert!(!manager.toggle_row("b"));
        assert!(!manager.toggle_all(&ids(&["a", "b"])));
        assert!(!manager.clear());
        assert!(!manager.prune(|_| false));
        assert_eq!(manager.selected_ids(), ids(&["a"]));
    }

    #[test]
    fn test_prune() {
        let mut manager = SelectionManager::new();
        manager.toggle_all(&ids(&["a", "b", "c"]));
        assert!(manager.prune(|id| id != "b"));
        assert!(!manager.prune(|id| id != "b"));
        assert_eq!(manager.selected_ids(), ids(&["a", "c"]));
    }
}
