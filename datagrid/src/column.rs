//! Column definitions and the accessors that project rows into cell values.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::value::CellValue;

/// Field lookup by name, used by [`Accessor::Field`].
///
/// Rows that are only ever read through [`Accessor::Derive`] can rely on the
/// default implementation, which yields [`CellValue::Null`] for every key.
///
/// # Example
///
/// ```
/// use datagrid::{CellValue, GridRow};
///
/// struct User {
///     name: String,
///     tasks: i64,
/// }
///
/// impl GridRow for User {
///     fn field(&self, key: &str) -> CellValue {
///         match key {
///             "name" => CellValue::from(&self.name),
///             "tasks" => CellValue::from(self.tasks),
///             _ => CellValue::Null,
///         }
///     }
/// }
/// ```
pub trait GridRow {
    /// Read the value stored under `key`. Unknown keys are null.
    fn field(&self, key: &str) -> CellValue {
        let _ = key;
        CellValue::Null
    }
}

impl GridRow for HashMap<String, CellValue> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl GridRow for BTreeMap<String, CellValue> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).cloned().unwrap_or_default()
    }
}

/// How a column reads its value out of a row.
pub enum Accessor<T> {
    /// Read a named field through [`GridRow::field`].
    Field(String),
    /// Compute the value from the whole row.
    Derive(Arc<dyn Fn(&T) -> CellValue + Send + Sync>),
}

impl<T> Accessor<T> {
    /// Accessor reading a named field.
    pub fn field(key: impl Into<String>) -> Self {
        Accessor::Field(key.into())
    }

    /// Accessor computing a value from the row.
    pub fn derive<F, V>(f: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        Accessor::Derive(Arc::new(move |row: &T| f(row).into()))
    }
}

impl<T: GridRow> Accessor<T> {
    /// Evaluate the accessor against a row.
    pub fn value(&self, row: &T) -> CellValue {
        match self {
            Accessor::Field(key) => row.field(key),
            Accessor::Derive(f) => f(row),
        }
    }
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(key) => Accessor::Field(key.clone()),
            Accessor::Derive(f) => Accessor::Derive(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(key) => f.debug_tuple("Field").field(key).finish(),
            Accessor::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Column configuration.
///
/// A column without an accessor is display-only: it is never searched,
/// never filtered and never sorted.
///
/// # Example
///
/// ```
/// use datagrid::{CellValue, Column, GridRow};
///
/// struct User {
///     name: String,
/// }
///
/// impl GridRow for User {}
///
/// let columns: Vec<Column<User>> = vec![
///     Column::new("name", "Name").derive(|u: &User| u.name.clone()).sortable(),
///     Column::new("actions", "Actions"),
/// ];
/// ```
pub struct Column<T> {
    /// Unique identifier for this column.
    pub id: String,
    /// Header label.
    pub header: String,
    /// How values are read from rows.
    pub accessor: Option<Accessor<T>>,
    /// Whether header activation sorts by this column.
    pub sortable: bool,
}

impl<T> Column<T> {
    /// Create a display-only column with the given id and header.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor: None,
            sortable: false,
        }
    }

    /// Read values from the named row field.
    pub fn field(mut self, key: impl Into<String>) -> Self {
        self.accessor = Some(Accessor::field(key));
        self
    }

    /// Compute values from the row.
    pub fn derive<F, V>(mut self, f: F) -> Self
    where
        T: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<CellValue>,
    {
        self.accessor = Some(Accessor::derive(f));
        self
    }

    /// Set the accessor directly.
    pub fn accessor(mut self, accessor: Accessor<T>) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Whether the column takes part in text filtering.
    pub fn is_searchable(&self) -> bool {
        self.accessor.is_some()
    }

    /// Whether the column can actually be sorted by.
    pub fn can_sort(&self) -> bool {
        self.sortable && self.accessor.is_some()
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .finish()
    }
}

impl<T: GridRow> Column<T> {
    /// Read this column's value from a row. Display-only columns yield null.
    pub fn value(&self, row: &T) -> CellValue {
        self.accessor
            .as_ref()
            .map(|accessor| accessor.value(row))
            .unwrap_or_default()
    }
}

/// Find a column by id.
pub fn find_column<'a, T>(columns: &'a [Column<T>], id: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|column| column.id == id)
}
