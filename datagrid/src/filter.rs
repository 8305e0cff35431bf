//! Filter stage: global text query plus optional per-column filters.

use std::collections::BTreeMap;

use log::trace;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use crate::column::{Column, GridRow};

/// Text filter state.
///
/// `per_column` is keyed by column id and only consulted when column filters
/// are enabled. An empty (or whitespace-only) entry is the same as no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Query matched against every searchable column.
    pub global_query: String,
    /// Per-column filter text.
    pub per_column: BTreeMap<String, String>,
}

impl FilterState {
    /// Create an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.global_query = query.into();
        self
    }

    /// Set a column filter.
    pub fn with_column_filter(mut self, column_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.per_column.insert(column_id.into(), text.into());
        self
    }

    /// Filter text for a column, if any was set.
    pub fn column_filter(&self, column_id: &str) -> Option<&str> {
        self.per_column.get(column_id).map(String::as_str)
    }

    /// Returns `true` if no query or column filter would reject anything.
    pub fn is_empty(&self) -> bool {
        self.global_query.trim().is_empty()
            && self.per_column.values().all(|text| text.trim().is_empty())
    }
}

/// How query text is matched against cell text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Contains,
    /// Case-insensitive fuzzy match.
    Fuzzy,
}

/// Options controlling the filter stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Whether `per_column` filters are applied.
    pub column_filters_enabled: bool,
    /// Matching strategy.
    pub match_mode: MatchMode,
}

/// A single prepared query.
struct TextMatcher {
    needle: String,
    fuzzy: Option<(Pattern, Matcher)>,
    buf: Vec<char>,
}

impl TextMatcher {
    /// Prepare a matcher, or `None` if the query is blank.
    fn new(query: &str, mode: MatchMode) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let fuzzy = match mode {
            MatchMode::Contains => None,
            MatchMode::Fuzzy => Some((
                Pattern::new(
                    query,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
                Matcher::new(Config::DEFAULT),
            )),
        };

        Some(Self {
            needle: query.to_lowercase(),
            fuzzy,
            buf: Vec::new(),
        })
    }

    fn matches(&mut self, haystack: &str) -> bool {
        match &mut self.fuzzy {
            None => haystack.to_lowercase().contains(&self.needle),
            Some((pattern, matcher)) => {
                let haystack = Utf32Str::new(haystack, &mut self.buf);
                pattern.score(haystack, matcher).is_some()
            }
        }
    }
}

/// Apply the filter stage.
///
/// Returns the indices of the rows that pass, in their original order. A row
/// passes when the global query is blank or some searchable column contains
/// it, AND every non-blank column filter matches its column.
///
/// Column filters naming an unknown column, or a column without an accessor,
/// are ignored.
pub fn filter_rows<T: GridRow>(
    rows: &[T],
    columns: &[Column<T>],
    state: &FilterState,
    options: FilterOptions,
) -> Vec<usize> {
    let searchable: Vec<&Column<T>> = columns.iter().filter(|c| c.is_searchable()).collect();

    let mut global = TextMatcher::new(&state.global_query, options.match_mode);

    let mut column_matchers: Vec<(&Column<T>, TextMatcher)> = Vec::new();
    if options.column_filters_enabled {
        for (column_id, text) in &state.per_column {
            let Some(matcher) = TextMatcher::new(text, options.match_mode) else {
                continue;
            };
            match searchable.iter().copied().find(|c| &c.id == column_id) {
                Some(column) => column_matchers.push((column, matcher)),
                None => trace!("ignoring filter for non-searchable column {}", column_id),
            }
        }
    }

    if global.is_none() && column_matchers.is_empty() {
        return (0..rows.len()).collect();
    }

    let result: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            let passes_global = match &mut global {
                None => true,
                Some(matcher) => searchable
                    .iter()
                    .any(|column| matcher.matches(&column.value(row).to_search_text())),
            };

            passes_global
                && column_matchers
                    .iter_mut()
                    .all(|(column, matcher)| matcher.matches(&column.value(row).to_search_text()))
        })
        .map(|(index, _)| index)
        .collect();

    trace!("filter kept {} of {} rows", result.len(), rows.len());
    result
}
