//! Typed field access shared by both record types.
//!
//! Every record exposes its columns through [`crate::record::MasterRecord::field`],
//! which returns a borrowed [`FieldValue`]. The query engine compares these
//! values, the projector stringifies them, and the importer validates raw
//! cells against the column's [`FieldKind`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Column registry
// ---------------------------------------------------------------------------

/// The value category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Id,
    Text,
    Enum,
    Number,
    Bool,
    Time,
}

/// Static description of one canonical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Canonical camelCase field name (also the JSON key).
    pub key: &'static str,
    /// Display label used for CSV headers.
    pub label: &'static str,
    pub kind: FieldKind,
}

impl ColumnSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }
}

/// Find the column for `key`.
pub fn find_column<'a>(columns: &'a [ColumnSpec], key: &str) -> Option<&'a ColumnSpec> {
    columns.iter().find(|c| c.key == key)
}

/// Display label for `key`; unknown keys pass through verbatim.
pub fn label_for<'a>(columns: &'a [ColumnSpec], key: &'a str) -> &'a str {
    find_column(columns, key).map_or(key, |c| c.label)
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// Yes/no tokens used when rendering boolean cells.
pub const BOOL_TRUE_LABEL: &str = "是";
pub const BOOL_FALSE_LABEL: &str = "否";

/// A borrowed view of one field of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Time(Timestamp),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(value)
    }

    pub fn opt_text(value: &'a Option<String>) -> Self {
        value.as_deref().map_or(FieldValue::Absent, FieldValue::Text)
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Number)
    }

    pub fn opt_bool(value: Option<bool>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Bool)
    }

    pub fn opt_time(value: Option<Timestamp>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Time)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Render the value the way it appears in an exported cell (unescaped).
    pub fn to_export_string(&self) -> String {
        match self {
            FieldValue::Absent => String::new(),
            FieldValue::Text(s) => (*s).to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Bool(true) => BOOL_TRUE_LABEL.to_string(),
            FieldValue::Bool(false) => BOOL_FALSE_LABEL.to_string(),
            FieldValue::Time(t) => format_timestamp(t),
        }
    }

    /// Plain string form used for string comparisons. Booleans render as
    /// `true`/`false` here rather than the display labels.
    pub fn to_sort_string(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            other => other.to_export_string(),
        }
    }

    /// Epoch milliseconds for timestamp ordering. Absent or unparsable
    /// values count as epoch 0.
    pub fn epoch_millis(&self) -> i64 {
        match self {
            FieldValue::Time(t) => t.timestamp_millis(),
            FieldValue::Text(s) => parse_timestamp(s).map_or(0, |t| t.timestamp_millis()),
            FieldValue::Number(n) if n.is_finite() => *n as i64,
            _ => 0,
        }
    }

    /// Timestamp view used by range filters. Absent values have none.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            FieldValue::Time(t) => Some(*t),
            FieldValue::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    /// Case-insensitive substring test. `needle_lower` must already be
    /// lowercased. Absent values never match.
    pub fn contains_lowercase(&self, needle_lower: &str) -> bool {
        match self {
            FieldValue::Absent => false,
            FieldValue::Text(s) => s.to_lowercase().contains(needle_lower),
            other => other.to_sort_string().to_lowercase().contains(needle_lower),
        }
    }
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Naive layouts accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a user-supplied timestamp.
///
/// Accepts RFC 3339, naive `date time` forms (as UTC) and bare dates (UTC
/// midnight). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-03-01T08:00:00.000Z`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Escape a single CSV cell: quote-wrap when the value contains a delimiter,
/// quote or line break, doubling internal quotes.
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
