//! Shared response envelope types for API handlers.
//!
//! Every JSON response uses the admin front-end's envelope:
//! `{ "code": 0, "message": "ok", "data": ..., "error": null }` on success.
//! Error envelopes are produced by [`crate::error::AppError`].

use serde::Serialize;

/// Business code of a successful response.
pub const SUCCESS_CODE: u16 = 0;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(page)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: &'static str,
    pub data: T,
    pub error: Option<ErrorBody>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "ok",
            data,
            error: None,
        }
    }
}

/// Machine-readable error detail carried by error envelopes.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}
