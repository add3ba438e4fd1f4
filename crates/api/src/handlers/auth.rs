//! Handlers for the `/auth` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mdm_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::accounts::authenticate;
use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
    pub real_name: String,
    pub roles: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate one of the fixed mock accounts and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let Json(input) = payload?;

    if input.username.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".into(),
        ));
    }

    let account = authenticate(&input.username, &input.password).ok_or_else(|| {
        tracing::info!(username = %input.username, "Rejected login");
        AppError::Core(CoreError::Unauthorized(
            "Username or password is incorrect".into(),
        ))
    })?;

    let access_token = generate_access_token(account.username, account.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(username = account.username, role = account.role, "Login succeeded");

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token,
        username: account.username.to_string(),
        real_name: account.real_name.to_string(),
        roles: vec![account.role.to_string()],
    })))
}
