//! Row identity.

use std::fmt;
use std::sync::Arc;

/// Stable string identity of a row within one data snapshot.
pub type RowId = String;

/// Assigns a [`RowId`] to each row.
///
/// The default uses the row's position. A custom resolver is used verbatim:
/// ids are neither validated nor deduplicated, so a resolver returning the
/// same id for two rows makes both rows share one selection entry.
///
/// # Example
///
/// ```
/// use datagrid::RowIdResolver;
///
/// struct User {
///     email: String,
/// }
///
/// let by_index: RowIdResolver<User> = RowIdResolver::default();
/// let by_email = RowIdResolver::custom(|user: &User, _| user.email.clone());
///
/// let user = User { email: "a@example.com".into() };
/// assert_eq!(by_index.resolve(&user, 3), "3");
/// assert_eq!(by_email.resolve(&user, 3), "a@example.com");
/// ```
pub enum RowIdResolver<T> {
    /// Position in the data array, as a string.
    Index,
    /// Caller-supplied `(row, index) -> id` function.
    Custom(Arc<dyn Fn(&T, usize) -> RowId + Send + Sync>),
}

impl<T> RowIdResolver<T> {
    /// Resolver backed by a caller-supplied function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&T, usize) -> RowId + Send + Sync + 'static,
    {
        RowIdResolver::Custom(Arc::new(f))
    }

    /// Resolve the id of one row.
    pub fn resolve(&self, row: &T, index: usize) -> RowId {
        match self {
            RowIdResolver::Index => index.to_string(),
            RowIdResolver::Custom(f) => f(row, index),
        }
    }

    /// Resolve the ids of every row, in order.
    pub fn resolve_all(&self, rows: &[T]) -> Vec<RowId> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.resolve(row, index))
            .collect()
    }
}

impl<T> Default for RowIdResolver<T> {
    fn default() -> Self {
        RowIdResolver::Index
    }
}

impl<T> Clone for RowIdResolver<T> {
    fn clone(&self) -> Self {
        match self {
            RowIdResolver::Index => RowIdResolver::Index,
            RowIdResolver::Custom(f) => RowIdResolver::Custom(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for RowIdResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIdResolver::Index => f.write_str("Index"),
            RowIdResolver::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
