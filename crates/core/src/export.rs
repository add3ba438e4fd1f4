//! Column projection and CSV rendering for the export and template
//! endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field::{csv_escape, label_for};
use crate::paginate::{paginate, PageRequest};
use crate::query::filter_records;
use crate::record::MasterRecord;
use crate::types::null_as_empty;

/// Which records an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    #[default]
    All,
    Paginated,
}

/// Body of an export request. Every key other than the named ones is
/// treated as a list filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub selected_columns: Vec<String>,
    #[serde(default)]
    pub export_mode: ExportMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub filters: BTreeMap<String, serde_json::Value>,
}

impl ExportConfig {
    /// Filter values as plain strings. Scalars are stringified, arrays use
    /// their first element, nulls and objects are dropped.
    pub fn filter_strings(&self) -> BTreeMap<String, String> {
        self.filters
            .iter()
            .filter_map(|(key, value)| filter_value_string(value).map(|v| (key.clone(), v)))
            .collect()
    }

    /// The file name to offer, without extension.
    pub fn file_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.file_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(default)
    }

    /// The page window, when the export is paginated and both bounds are
    /// positive. Unlike the list endpoint the page size is not capped.
    pub fn page_window(&self) -> Option<PageRequest> {
        match (self.export_mode, self.page_number, self.page_size) {
            (ExportMode::Paginated, Some(page), Some(size)) if page > 0 && size > 0 => {
                Some(PageRequest {
                    page: page as u64,
                    page_size: size as u64,
                })
            }
            _ => None,
        }
    }
}

fn filter_value_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Array(items) => items.first().and_then(filter_value_string),
        serde_json::Value::Null | serde_json::Value::Object(_) => None,
    }
}

/// Headers plus stringified (unescaped) cells, aligned by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Projection {
    /// Render as CSV: escaped cells joined with `,`, lines with `\n`, no
    /// trailing newline.
    pub fn to_csv(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| csv_line(row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| csv_escape(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Project `records` onto `columns`. An empty column list means every
/// canonical column in canonical order. Unknown columns keep their name as
/// header and render empty cells.
pub fn project<R: MasterRecord>(records: &[&R], columns: &[String]) -> Projection {
    let keys: Vec<&str> = if columns.is_empty() {
        R::COLUMNS.iter().map(|c| c.key).collect()
    } else {
        columns.iter().map(String::as_str).collect()
    };

    let headers = keys
        .iter()
        .map(|key| label_for(R::COLUMNS, key).to_string())
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            keys.iter()
                .map(|key| record.field(key).to_export_string())
                .collect()
        })
        .collect();

    Projection { headers, rows }
}

/// Run an export: filter (no sort), optionally window, then project.
pub fn export<R: MasterRecord>(records: &[R], config: &ExportConfig) -> Projection {
    let matched = filter_records(records, &config.filter_strings());
    let selected = match config.page_window() {
        Some(window) => paginate(matched, window).items,
        None => matched,
    };
    project(&selected, &config.selected_columns)
}

/// The import template: the template header row followed by one newline.
pub fn template_csv<R: MasterRecord>() -> String {
    let labels: Vec<&str> = R::TEMPLATE_COLUMNS
        .iter()
        .map(|key| label_for(R::COLUMNS, key))
        .collect();
    format!("{}\n", csv_line(&labels))
}
