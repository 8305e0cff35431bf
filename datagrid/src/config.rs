//! Grid configuration.

use std::collections::HashSet;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::ConfigError;
use crate::filter::{FilterOptions, MatchMode};

/// Configuration for a [`Grid`](crate::Grid).
///
/// Deserializes from partial input: missing fields take their defaults.
///
/// # Example
///
/// ```
/// use datagrid::{GridConfig, MatchMode};
///
/// let config = GridConfig::default()
///     .with_default_page_size(25)
///     .with_page_size_options(vec![25, 50, 100])
///     .with_column_filters(true)
///     .with_row_selection(true)
///     .with_match_mode(MatchMode::Fuzzy);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows per page before the user picks a size.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Page sizes offered to the user.
    ///
    /// Default: `[10, 25, 50]`
    pub page_size_options: Vec<usize>,

    /// Whether per-column filters are applied.
    ///
    /// Default: false
    pub column_filters_enabled: bool,

    /// Whether rows can be selected.
    ///
    /// Default: false
    pub row_selection_enabled: bool,

    /// Text matching strategy for filters.
    ///
    /// Default: [`MatchMode::Contains`]
    pub match_mode: MatchMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 25, 50],
            column_filters_enabled: false,
            row_selection_enabled: false,
            match_mode: MatchMode::Contains,
        }
    }
}

impl GridConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Enables or disables per-column filters.
    pub fn with_column_filters(mut self, enabled: bool) -> Self {
        self.column_filters_enabled = enabled;
        self
    }

    /// Enables or disables row selection.
    pub fn with_row_selection(mut self, enabled: bool) -> Self {
        self.row_selection_enabled = enabled;
        self
    }

    /// Sets the text matching strategy.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Options handed to the filter stage.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            column_filters_enabled: self.column_filters_enabled,
            match_mode: self.match_mode,
        }
    }

    /// Checks the config for values the grid would have to correct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidDefaultPageSize);
        }
        if self.page_size_options.is_empty() {
            return Err(ConfigError::EmptyPageSizeOptions);
        }
        if let Some(&bad) = self.page_size_options.iter().find(|&&size| size == 0) {
            return Err(ConfigError::InvalidPageSizeOption(bad));
        }
        Ok(())
    }

    /// Checks that column ids are unique.
    pub fn validate_columns<T>(columns: &[Column<T>]) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for column in columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(())
    }

    /// Returns a copy with invalid values replaced.
    ///
    /// A zero default page size becomes 1, zero options are dropped, and an
    /// empty option list falls back to just the default page size.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if config.default_page_size == 0 {
            warn!("default page size 0 is invalid, using 1");
            config.default_page_size = 1;
        }

        let before = config.page_size_options.len();
        config.page_size_options.retain(|&size| size > 0);
        if config.page_size_options.len() != before {
            warn!("dropped {} zero page size options", before - config.page_size_options.len());
        }
        if config.page_size_options.is_empty() {
            config.page_size_options.push(config.default_page_size);
        }

        config
    }
}
