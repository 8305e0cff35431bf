//! Error types for the strict entry points.
//!
//! The lenient API never fails: it clamps or ignores bad input and logs.
//! These errors are only returned by the `try_*` methods and
//! [`GridConfig::validate`](crate::GridConfig::validate).

use thiserror::Error;

/// Invalid grid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The default page size is zero.
    #[error("Default page size must be at least 1")]
    InvalidDefaultPageSize,

    /// No page-size options were given.
    #[error("Page size options must not be empty")]
    EmptyPageSizeOptions,

    /// A page-size option is zero.
    #[error("Page size option {0} is invalid, options must be at least 1")]
    InvalidPageSizeOption(usize),

    /// Two columns share an id.
    #[error("Column id '{0}' is used more than once")]
    DuplicateColumn(String),
}

/// Errors returned by the strict grid operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The configuration failed validation.
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// No column has this id.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    /// The column exists but is not sortable or has no accessor.
    #[error("Column '{0}' is not sortable")]
    ColumnNotSortable(String),

    /// A page size below 1 was requested.
    #[error("Page size {0} is invalid, must be at least 1")]
    InvalidPageSize(usize),
}
