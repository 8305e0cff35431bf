//! Cell values produced by column accessors.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A primitive value read out of a row by a column accessor.
///
/// This is the only shape the engine inspects: filtering works on its
/// stringified form and sorting on its normalized [`SortKey`].
///
/// # Example
///
/// ```
/// use datagrid::CellValue;
///
/// let name = CellValue::from("Alpha");
/// let tasks = CellValue::from(10i64);
/// let active = CellValue::from(true);
/// let missing = CellValue::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value. Stringifies to `""`.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Text value.
    Text(String),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Date(_) => "date",
            CellValue::Text(_) => "text",
        }
    }

    /// String form used for text matching.
    ///
    /// Null is the empty string, so it never matches a non-empty query.
    pub fn to_search_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(v) => v.to_string(),
            CellValue::Int(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Date(v) => v.to_rfc3339_opts(SecondsFormat::Secs, true),
            CellValue::Text(v) => v.clone(),
        }
    }

    /// Normalize into a comparable key.
    ///
    /// Dates become epoch milliseconds, booleans `0`/`1`, null the empty
    /// string. Everything else keeps its value.
    pub fn sort_key(&self) -> SortKey {
        match self {
            CellValue::Null => SortKey::Text(String::new()),
            CellValue::Bool(v) => SortKey::Integer(i64::from(*v)),
            CellValue::Int(v) => SortKey::Integer(*v),
            CellValue::Float(v) => SortKey::Number(*v),
            CellValue::Date(v) => SortKey::Integer(v.timestamp_millis()),
            CellValue::Text(v) => SortKey::Text(v.clone()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(i64::from(v))
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(i64::from(v))
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(v: &String) -> Self {
        CellValue::Text(v.clone())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::Date(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

// =============================================================================
// SortKey
// =============================================================================

/// Normalized, totally ordered sort key.
///
/// Numbers compare numerically, text by code point. Across kinds, numbers
/// order before text.
#[derive(Debug, Clone)]
pub enum SortKey {
    /// Exact integer (also dates and booleans).
    Integer(i64),
    /// Floating point number.
    Number(f64),
    /// Text (also null, as `""`).
    Text(String),
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Number(b)) => cmp_int_float(*a, *b),
            (SortKey::Number(a), SortKey::Integer(b)) => cmp_int_float(*b, *a).reverse(),
            (SortKey::Number(a), SortKey::Number(b)) => fold_zero(*a).total_cmp(&fold_zero(*b)),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Text(_), _) => Ordering::Greater,
            (_, SortKey::Text(_)) => Ordering::Less,
        }
    }
}

/// `-0.0` and `0.0` both equal the integer 0, so they must equal each other.
fn fold_zero(f: f64) -> f64 {
    if f == 0.0 { 0.0 } else { f }
}

/// Exact comparison of an integer against a float.
///
/// Casting the integer to `f64` would round above 2^53 and break
/// transitivity. NaN orders by sign, like `f64::total_cmp`.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }

    let floor = f.floor();
    match i.cmp(&(floor as i64)) {
        Ordering::Equal if f > floor => Ordering::Less,
        ordering => ordering,
    }
}
