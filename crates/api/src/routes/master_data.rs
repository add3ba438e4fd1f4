//! Route definitions shared by `/manufacture/bom` and `/manufacture/material`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::master_data;
use crate::state::{AppState, ServedEntity};

/// Routes mounted at `/manufacture/{entity}`.
///
/// ```text
/// GET  /list      -> list
/// GET  /template  -> template
/// POST /import    -> import
/// POST /export    -> export
/// POST /delete    -> delete
/// POST /report    -> report
/// ```
pub fn router<R: ServedEntity>() -> Router<AppState> {
    Router::new()
        .route("/list", get(master_data::list::<R>))
        .route("/template", get(master_data::template::<R>))
        .route("/import", post(master_data::import::<R>))
        .route("/export", post(master_data::export::<R>))
        .route("/delete", post(master_data::delete::<R>))
        .route("/report", post(master_data::report::<R>))
}
