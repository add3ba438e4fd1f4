//! CSV import validation.
//!
//! An uploaded file is parsed and checked row by row against the entity's
//! column registry. Nothing is written to the store: the outcome only
//! reports what an import would have done.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::faults::{FaultPolicy, FaultSite};
use crate::field::{parse_timestamp, ColumnSpec, FieldKind};
use crate::record::{join_key, MasterRecord};
use crate::store::RecordStore;

/// One rejected row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    /// 1-based line in the uploaded file; the header is line 1.
    pub row_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Aggregate result of an import. `error_count` mirrors `failed_count`;
/// both names are in use by front-end clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub total_rows: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub error_count: usize,
    pub duplicate_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ImportRowError>,
}

impl ImportOutcome {
    fn accept(&mut self) {
        self.success_count += 1;
    }

    fn reject(&mut self, error: ImportRowError) {
        self.failed_count += 1;
        self.error_count = self.failed_count;
        self.errors.push(error);
    }
}

/// Accepted spellings of boolean cells.
pub fn parse_bool_token(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "是" | "true" | "1" | "yes" => Some(true),
        "否" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Validate an uploaded CSV against entity `R`.
///
/// Returns [`CoreError::Validation`] only when the header row is missing or
/// names no known column; every per-row problem is reported in the outcome.
pub fn validate_import<R: MasterRecord>(
    bytes: &[u8],
    store: &RecordStore<R>,
    faults: &dyn FaultPolicy,
    overwrite_duplicates: bool,
) -> Result<ImportOutcome, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .byte_headers()
        .map_err(|e| CoreError::Validation(format!("Unreadable CSV header: {e}")))?
        .clone();
    let columns: Vec<Option<&'static ColumnSpec>> = headers
        .iter()
        .map(|raw| resolve_header::<R>(&String::from_utf8_lossy(raw)))
        .collect();
    if columns.iter().all(Option::is_none) {
        return Err(CoreError::Validation(
            "CSV header names no known column".to_string(),
        ));
    }

    let mut outcome = ImportOutcome::default();
    let mut seen_keys: HashSet<String> = HashSet::new();

    for result in reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let row_number = e.position().map_or(0, |p| p.line());
                outcome.total_rows += 1;
                outcome.reject(ImportRowError {
                    row_number,
                    field: None,
                    message: format!("Malformed row: {e}"),
                    value: None,
                });
                continue;
            }
        };

        if record.iter().all(|cell| cell.trim_ascii().is_empty()) {
            continue;
        }
        outcome.total_rows += 1;
        let row_number = record.position().map_or(0, |p| p.line());

        let row = match decode_row(&columns, &record) {
            Ok(row) => row,
            Err(column) => {
                outcome.reject(ImportRowError {
                    row_number,
                    field: Some(column.key.to_string()),
                    message: "Malformed row: cell is not valid UTF-8".to_string(),
                    value: None,
                });
                continue;
            }
        };

        if let Some(error) = check_row::<R>(&row, row_number) {
            outcome.reject(error);
            continue;
        }

        let key_parts: Vec<&str> = R::KEY_FIELDS.iter().map(|k| row.get(k)).collect();
        let key = join_key(&key_parts);
        let in_file = !seen_keys.insert(key.clone());
        if in_file || store.contains_key(&key) {
            outcome.duplicate_count += 1;
            if !overwrite_duplicates {
                outcome.reject(ImportRowError {
                    row_number,
                    field: R::KEY_FIELDS.first().map(|k| (*k).to_string()),
                    message: format!("Duplicate {} record", R::ENTITY),
                    value: Some(key_parts.join(" / ")),
                });
                continue;
            }
        }

        if faults.should_fail(FaultSite::ImportRow) {
            outcome.reject(ImportRowError {
                row_number,
                field: None,
                message: "Row rejected by the target system".to_string(),
                value: None,
            });
            continue;
        }

        outcome.accept();
    }

    Ok(outcome)
}

/// Match a header cell to a column by display label or canonical key.
fn resolve_header<R: MasterRecord>(raw: &str) -> Option<&'static ColumnSpec> {
    let name = raw.trim_start_matches('\u{feff}').trim();
    if name.is_empty() {
        return None;
    }
    R::COLUMNS
        .iter()
        .find(|c| c.label == name || c.key == name)
}

/// Decoded cells of one row, keyed by column.
struct Row<'a> {
    cells: Vec<(&'static ColumnSpec, &'a str)>,
}

impl Row<'_> {
    /// Trimmed value for `key`; missing columns read as empty.
    fn get(&self, key: &str) -> &str {
        self.cells
            .iter()
            .find(|(column, _)| column.key == key)
            .map_or("", |(_, value)| value.trim())
    }
}

fn decode_row<'a>(
    columns: &[Option<&'static ColumnSpec>],
    record: &'a csv::ByteRecord,
) -> Result<Row<'a>, &'static ColumnSpec> {
    let mut cells = Vec::with_capacity(columns.len());
    for (column, raw) in columns.iter().zip(record.iter()) {
        let Some(column) = column else { continue };
        let value = std::str::from_utf8(raw).map_err(|_| *column)?;
        cells.push((*column, value));
    }
    Ok(Row { cells })
}

/// First failing check of a decoded row, if any.
fn check_row<R: MasterRecord>(row: &Row<'_>, row_number: u64) -> Option<ImportRowError> {
    for key in R::REQUIRED_FIELDS {
        if row.get(key).is_empty() {
            let label = crate::field::label_for(R::COLUMNS, key);
            return Some(ImportRowError {
                row_number,
                field: Some((*key).to_string()),
                message: format!("{label} is required"),
                value: None,
            });
        }
    }

    for (column, raw) in &row.cells {
        let value = raw.trim();
        if value.is_empty() {
            continue;
        }
        let problem = match column.kind {
            FieldKind::Number => value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .is_none()
                .then_some("must be a number"),
            FieldKind::Time => parse_timestamp(value)
                .is_none()
                .then_some("must be a date or date-time"),
            FieldKind::Bool => parse_bool_token(value)
                .is_none()
                .then_some("must be 是/否"),
            FieldKind::Id | FieldKind::Text | FieldKind::Enum => None,
        };
        if let Some(problem) = problem {
            return Some(ImportRowError {
                row_number,
                field: Some(column.key.to_string()),
                message: format!("{} {problem}", column.label),
                value: Some(value.to_string()),
            });
        }
    }

    None
}
