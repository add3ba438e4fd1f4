//! Handlers shared by the BOM and Material resources.
//!
//! Every handler is generic over [`ServedEntity`]; the route module
//! instantiates them once per entity. All of them require a valid bearer
//! token, checked before the request body is read.

use std::time::Duration;

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use mdm_core::actions::{self, DeleteOutcome, DeleteRequest, ReportOutcome, ReportRequest};
use mdm_core::export::{self, template_csv, ExportConfig};
use mdm_core::import::{validate_import, ImportOutcome};
use mdm_core::paginate::Page;
use mdm_core::query::{self, ListQuery};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::{AppState, ServedEntity};

/// Content type of every CSV download.
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

/// Multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";
/// Multipart field carrying the overwrite flag (`"true"` to enable).
const OVERWRITE_FIELD: &str = "overwriteDuplicates";

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/manufacture/{entity}/list
///
/// Filter, sort and paginate the entity's records. Query parameters other
/// than `sortBy`, `sortOrder`, `page` and `pageSize` are filters.
pub async fn list<R: ServedEntity>(
    user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<ApiResponse<Page<R>>>> {
    let Query(pairs) = params?;
    let query = ListQuery::from_pairs(pairs);

    let latency = state.config.mock.list_latency_ms;
    if latency > 0 {
        tokio::time::sleep(Duration::from_millis(latency)).await;
    }

    let page = query::list(R::store(&state).records(), &query);

    tracing::debug!(
        entity = R::ENTITY,
        user = %user.username,
        filters = query.filters.len(),
        page = query.page.page,
        total = page.total,
        "Listed records"
    );

    Ok(Json(ApiResponse::ok(page)))
}

// ---------------------------------------------------------------------------
// Template / export
// ---------------------------------------------------------------------------

/// GET /api/manufacture/{entity}/template
///
/// Download the CSV import template (header row only).
pub async fn template<R: ServedEntity>(user: AuthUser) -> AppResult<Response> {
    tracing::debug!(entity = R::ENTITY, user = %user.username, "Serving import template");
    csv_attachment(R::TEMPLATE_FILE_NAME, template_csv::<R>())
}

/// POST /api/manufacture/{entity}/export
///
/// Render the filtered records (optionally one page of them) as CSV.
pub async fn export<R: ServedEntity>(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ExportConfig>, JsonRejection>,
) -> AppResult<Response> {
    let Json(config) = payload?;

    let projection = export::export(R::store(&state).records(), &config);
    let file_name = format!("{}.csv", config.file_name_or(R::EXPORT_FILE_NAME));

    tracing::info!(
        entity = R::ENTITY,
        user = %user.username,
        mode = ?config.export_mode,
        rows = projection.rows.len(),
        columns = projection.headers.len(),
        "Exported records"
    );

    csv_attachment(&file_name, projection.to_csv())
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// POST /api/manufacture/{entity}/import
///
/// Validate an uploaded CSV (`file` field) and report per-row results.
/// `overwriteDuplicates=true` accepts rows whose natural key already exists.
pub async fn import<R: ServedEntity>(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<ApiResponse<ImportOutcome>>> {
    let mut multipart = multipart?;

    let mut upload: Option<(String, axum::body::Bytes)> = None;
    let mut overwrite = false;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or("upload.csv").to_string();
                let data = field.bytes().await?;
                upload = Some((file_name, data));
            }
            Some(OVERWRITE_FIELD) => {
                overwrite = field.text().await?.trim() == "true";
            }
            _ => {}
        }
    }

    let Some((file_name, data)) = upload.filter(|(_, data)| !data.is_empty()) else {
        return Err(AppError::BadRequest("No file provided".into()));
    };

    let outcome = validate_import(&data, R::store(&state), state.faults.as_ref(), overwrite)?;

    tracing::info!(
        entity = R::ENTITY,
        user = %user.username,
        file = %file_name,
        overwrite,
        total = outcome.total_rows,
        succeeded = outcome.success_count,
        failed = outcome.failed_count,
        duplicates = outcome.duplicate_count,
        "Validated import"
    );

    Ok(Json(ApiResponse::ok(outcome)))
}

// ---------------------------------------------------------------------------
// Delete / report
// ---------------------------------------------------------------------------

/// POST /api/manufacture/{entity}/delete
///
/// Bulk delete by id. The store is not modified; the response reports what
/// would have been deleted.
pub async fn delete<R: ServedEntity>(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<DeleteOutcome>>> {
    let Json(request) = payload?;

    let outcome = actions::delete(R::store(&state), &request.ids, state.faults.as_ref())?;

    tracing::info!(
        entity = R::ENTITY,
        user = %user.username,
        requested = request.ids.len(),
        deleted = outcome.deleted_count,
        failed = outcome.failed_ids.len(),
        "Processed delete request"
    );

    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/manufacture/{entity}/report
///
/// Submit records to the external reporting system. An absent body or an
/// empty `recordIds` reports every record.
pub async fn report<R: ServedEntity>(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<ReportOutcome>>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => ReportRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let outcome = actions::report(R::store(&state), &request.record_ids, state.faults.as_ref())?;

    tracing::info!(
        entity = R::ENTITY,
        user = %user.username,
        reported = outcome.reported_count,
        "Reported records to external system"
    );

    Ok(Json(ApiResponse::ok(outcome)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a CSV download response.
fn csv_attachment(file_name: &str, body: String) -> AppResult<Response> {
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
            (CONTENT_DISPOSITION, content_disposition(file_name)?),
        ],
        body,
    )
        .into_response())
}

/// `attachment` disposition carrying both the raw UTF-8 name and an
/// RFC 5987 `filename*` for clients that need the encoded form.
pub fn content_disposition(file_name: &str) -> AppResult<HeaderValue> {
    let plain: String = file_name
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    let value = format!(
        "attachment; filename=\"{plain}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    );
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|e| AppError::InternalError(format!("Invalid Content-Disposition header: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_keeps_utf8_name_and_encodes_fallback() {
        let value = content_disposition("BOM主数据.csv").unwrap();
        let text = String::from_utf8(value.as_bytes().to_vec()).unwrap();
        assert_eq!(
            text,
            "attachment; filename=\"BOM主数据.csv\"; filename*=UTF-8''BOM%E4%B8%BB%E6%95%B0%E6%8D%AE.csv"
        );
    }

    #[test]
    fn disposition_sanitizes_quotes_and_control_characters() {
        let value = content_disposition("a\"b\nc.csv").unwrap();
        let text = String::from_utf8(value.as_bytes().to_vec()).unwrap();
        assert!(text.starts_with("attachment; filename=\"a_b_c.csv\";"));
    }
}
