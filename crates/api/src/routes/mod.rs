pub mod auth;
pub mod health;
pub mod master_data;

use axum::Router;
use mdm_core::bom::BomRecord;
use mdm_core::material::MaterialRecord;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /manufacture/bom/list                            list (GET, query params)
/// /manufacture/bom/template                        CSV import template (GET)
/// /manufacture/bom/import                          validate CSV upload (POST, multipart)
/// /manufacture/bom/export                          export CSV (POST)
/// /manufacture/bom/delete                          bulk delete (POST)
/// /manufacture/bom/report                          report to external system (POST)
///
/// /manufacture/material/...                        same six routes as BOM
/// ```
///
/// Everything except `/auth/login` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/manufacture/bom", master_data::router::<BomRecord>())
        .nest("/manufacture/material", master_data::router::<MaterialRecord>())
}
