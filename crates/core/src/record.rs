//! The [`MasterRecord`] trait: the per-entity registry of columns, filters
//! and import rules that the generic pipeline runs against.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::field::{ColumnSpec, FieldValue};

/// One logical filter parameter and the record field(s) it inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRule {
    /// Case-insensitive substring match. With more than one field the
    /// record matches when any of them contains the value.
    Contains {
        param: &'static str,
        fields: &'static [&'static str],
    },
    /// Inclusive lower timestamp bound on `field`.
    From {
        param: &'static str,
        field: &'static str,
    },
    /// Inclusive upper timestamp bound on `field`.
    Until {
        param: &'static str,
        field: &'static str,
    },
}

impl FilterRule {
    pub fn param(&self) -> &'static str {
        match self {
            FilterRule::Contains { param, .. }
            | FilterRule::From { param, .. }
            | FilterRule::Until { param, .. } => *param,
        }
    }
}

/// A master-data record type served by the admin API.
pub trait MasterRecord: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Entity name used in logs and error messages (e.g. `"BOM"`).
    const ENTITY: &'static str;

    /// Every exportable column, in canonical order.
    const COLUMNS: &'static [ColumnSpec];

    /// Columns of the import template, in order.
    const TEMPLATE_COLUMNS: &'static [&'static str];

    /// Recognised filter parameters for list and export requests.
    const FILTERS: &'static [FilterRule];

    /// Fields that must be non-empty on every imported row.
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Fields forming the natural key used for duplicate detection.
    const KEY_FIELDS: &'static [&'static str];

    /// Default export file name, without extension.
    const EXPORT_FILE_NAME: &'static str;

    /// File name of the downloadable import template.
    const TEMPLATE_FILE_NAME: &'static str;

    fn id(&self) -> &str;

    /// Typed accessor for a canonical field. Unknown names yield
    /// [`FieldValue::Absent`].
    fn field(&self, key: &str) -> FieldValue<'_>;

    fn create_time(&self) -> crate::types::Timestamp;

    fn update_time(&self) -> crate::types::Timestamp;

    /// Natural key of this record, built from [`Self::KEY_FIELDS`].
    fn natural_key(&self) -> String {
        let parts: Vec<String> = Self::KEY_FIELDS
            .iter()
            .map(|key| self.field(key).to_export_string())
            .collect();
        join_key(&parts)
    }
}

/// Join natural-key parts with a separator that cannot appear in cell text.
pub fn join_key<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .collect::<Vec<_>>()
        .join("\u{1f}")
}
