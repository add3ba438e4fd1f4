#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mdm_api::auth::jwt::{generate_access_token, JwtConfig};
use mdm_api::config::{MockConfig, ServerConfig};
use mdm_api::router::build_app_router;
use mdm_api::state::AppState;
use mdm_core::bom::BomRecord;
use mdm_core::faults::{FaultPolicy, NoFaults};
use mdm_core::fixtures::{sample_bom, sample_material};
use mdm_core::material::MaterialRecord;
use mdm_core::store::RecordStore;

/// Boundary used by [`post_multipart_auth`].
const BOUNDARY: &str = "mdm-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5666".to_string()],
        request_timeout_secs: 30,
        log_json: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 120,
        },
        mock: MockConfig::default(),
    }
}

/// Three BOM records, newest first by creation time: `BOM000003`,
/// `BOM000002`, `BOM000001`.
pub fn bom_records() -> Vec<BomRecord> {
    let first = sample_bom("BOM000001");

    let mut second = sample_bom("BOM000002");
    second.business_unit_code = "BU002".to_string();
    second.business_unit = Some("商用车事业部".to_string());
    second.bom_change_time = None;
    second.create_time = first.create_time + Duration::days(10);
    second.update_time = first.create_time + Duration::days(11);

    let mut third = sample_bom("BOM000003");
    third.supplier_code = Some("SUP002".to_string());
    third.supplier_name = Some("博世汽车部件（苏州）有限公司".to_string());
    third.child_part_quantity = Some(12.0);
    third.create_time = first.create_time + Duration::days(20);
    third.update_time = first.create_time + Duration::days(21);

    vec![first, second, third]
}

/// Two material records: `CHERY-00000001` (SOP) and `CHERY-00000002`
/// (not SOP, created a day later).
pub fn material_records() -> Vec<MaterialRecord> {
    let first = sample_material("CHERY-00000001");

    let mut second = sample_material("CHERY-00000002");
    second.is_sop = Some(false);
    second.factory_name = Some("鄂尔多斯工厂".to_string());
    second.create_time = first.create_time + Duration::days(1);
    second.update_time = first.create_time + Duration::days(2);

    vec![first, second]
}

/// Application state over the fixed test records and the given fault policy.
pub fn test_state(faults: Arc<dyn FaultPolicy>) -> AppState {
    AppState {
        config: Arc::new(test_config()),
        boms: Arc::new(RecordStore::new(bom_records()).unwrap()),
        materials: Arc::new(RecordStore::new(material_records()).unwrap()),
        faults,
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    build_app_router(state, &config)
}

/// Router over the test records with fault injection disabled.
pub fn default_app() -> Router {
    build_test_app(test_state(Arc::new(NoFaults)))
}

/// A valid access token for the `vben` account.
pub fn token() -> String {
    generate_access_token("vben", "super", &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a `multipart/form-data` body. Each part is `(name, file_name, data)`.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    parts: &[(&str, Option<&str>, &[u8])],
) -> Response {
    let mut body: Vec<u8> = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: text/csv\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
