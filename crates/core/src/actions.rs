//! Mock mutation actions: bulk delete and report-to-external-system.
//!
//! Neither action changes the store. They compute the result a real backend
//! would return, with failures supplied by the [`FaultPolicy`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::faults::{FaultPolicy, FaultSite};
use crate::record::MasterRecord;
use crate::store::RecordStore;
use crate::types::null_as_empty;

pub const REPORT_FAILED: &str = "REPORT_FAILED";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub record_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutcome {
    pub success: bool,
    pub reported_count: usize,
    pub message: String,
}

/// Simulate deleting `ids`.
///
/// Ids are de-duplicated in order. Unknown ids fail; when the policy fires,
/// the first remaining id fails as well.
pub fn delete<R: MasterRecord>(
    store: &RecordStore<R>,
    ids: &[String],
    faults: &dyn FaultPolicy,
) -> Result<DeleteOutcome, CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("No IDs provided".to_string()));
    }

    let mut seen = HashSet::new();
    let unique: Vec<&String> = ids.iter().filter(|id| seen.insert(id.as_str())).collect();

    let (mut accepted, mut failed_ids): (Vec<&String>, Vec<&String>) =
        unique.into_iter().partition(|id| store.contains_id(id));

    if !accepted.is_empty() && faults.should_fail(FaultSite::Delete) {
        failed_ids.insert(0, accepted.remove(0));
    }

    Ok(DeleteOutcome {
        deleted_count: accepted.len(),
        failed_ids: failed_ids.into_iter().cloned().collect(),
    })
}

/// Simulate submitting records to the external reporting system. An empty
/// id list reports every record.
pub fn report<R: MasterRecord>(
    store: &RecordStore<R>,
    record_ids: &[String],
    faults: &dyn FaultPolicy,
) -> Result<ReportOutcome, CoreError> {
    let reported_count = if record_ids.is_empty() {
        store.len()
    } else {
        let wanted: HashSet<&str> = record_ids.iter().map(String::as_str).collect();
        wanted.into_iter().filter(|id| store.contains_id(id)).count()
    };

    if faults.should_fail(FaultSite::Report) {
        return Err(CoreError::Upstream {
            code: REPORT_FAILED,
            message: "Failed to submit data to external reporting system".to_string(),
            detail: "External system is temporarily unavailable".to_string(),
        });
    }

    let success = reported_count > 0;
    let message = if success {
        format!("Successfully reported {reported_count} record(s)")
    } else {
        "No records to report".to_string()
    };

    Ok(ReportOutcome {
        success,
        reported_count,
        message,
    })
}
