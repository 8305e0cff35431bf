//! Internally owned vs externally controlled state.

use std::fmt;

/// Callback invoked with the value a controlled state wants to move to.
pub type ChangeCallback<S> = Box<dyn FnMut(&S) + Send>;

/// Who owns a piece of grid state.
///
/// Both variants expose the same read/write surface:
///
/// - `Owned` holds the value and [`set`](Owner::set) replaces it.
/// - `External` mirrors a value owned by the caller. [`set`](Owner::set)
///   only reports the proposed value through `on_change`; the mirrored value
///   changes when the caller hands it back through [`sync`](Owner::sync).
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use datagrid::Owner;
///
/// let proposed = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&proposed);
/// let mut page = Owner::external(1usize, move |next: &usize| {
///     sink.lock().unwrap().push(*next);
/// });
///
/// page.set(2);
/// assert_eq!(*page.get(), 1);
/// assert_eq!(*proposed.lock().unwrap(), vec![2]);
///
/// page.sync(2);
/// assert_eq!(*page.get(), 2);
/// ```
pub enum Owner<S> {
    /// State held by the grid itself.
    Owned(S),
    /// State held by the caller and mirrored here.
    External {
        /// Last value supplied by the caller.
        value: S,
        /// Receives proposed changes.
        on_change: ChangeCallback<S>,
    },
}

impl<S> Owner<S> {
    /// Internally owned state.
    pub fn owned(value: S) -> Self {
        Owner::Owned(value)
    }

    /// Externally controlled state.
    pub fn external<F>(value: S, on_change: F) -> Self
    where
        F: FnMut(&S) + Send + 'static,
    {
        Owner::External {
            value,
            on_change: Box::new(on_change),
        }
    }

    /// Current value.
    pub fn get(&self) -> &S {
        match self {
            Owner::Owned(value) => value,
            Owner::External { value, .. } => value,
        }
    }

    /// Returns `true` for externally controlled state.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Owner::External { .. })
    }

    /// Move to a new value, or propose it to the external owner.
    pub fn set(&mut self, next: S) {
        match self {
            Owner::Owned(value) => *value = next,
            Owner::External { on_change, .. } => on_change(&next),
        }
    }

    /// Update through a closure applied to a copy of the current value.
    pub fn update<F>(&mut self, f: F)
    where
        S: Clone,
        F: FnOnce(&mut S),
    {
        let mut next = self.get().clone();
        f(&mut next);
        self.set(next);
    }

    /// Mirror a value handed in by the owner.
    ///
    /// For owned state this is the same as [`set`](Owner::set).
    pub fn sync(&mut self, next: S) {
        match self {
            Owner::Owned(value) => *value = next,
            Owner::External { value, .. } => *value = next,
        }
    }
}

impl<S: Default> Default for Owner<S> {
    fn default() -> Self {
        Owner::Owned(S::default())
    }
}

impl<S: fmt::Debug> fmt::Debug for Owner<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Owned(value) => f.debug_tuple("Owned").field(value).finish(),
            Owner::External { value, .. } => f
                .debug_struct("External")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}
