//! Integration tests for the error envelope on malformed requests.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, get_auth, post_json_auth, token};
use serde_json::json;

fn authed_post(uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", token()));
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body)).unwrap()
}

// ---------------------------------------------------------------------------
// Test: unknown route returns the 404 envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404_envelope() {
    let response = get(common::default_app(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], 404);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: malformed JSON is a 400 envelope, not a plain-text rejection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_json_returns_400_envelope() {
    let request = authed_post(
        "/api/manufacture/bom/delete",
        Some("application/json"),
        "{ not json",
    );
    let response = common::send(common::default_app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 400);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn wrong_json_shape_returns_400_envelope() {
    let response = post_json_auth(
        common::default_app(),
        "/api/manufacture/bom/delete",
        &token(),
        json!({ "ids": "bom-BOM000001" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: import requires a multipart body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn import_without_multipart_returns_400_envelope() {
    let request = authed_post(
        "/api/manufacture/material/import",
        Some("application/json"),
        "{}",
    );
    let response = common::send(common::default_app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: report accepts an absent body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_without_body_reports_everything() {
    let request = authed_post("/api/manufacture/material/report", None, "");
    let response = common::send(common::default_app(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["reportedCount"], 2);
}

// ---------------------------------------------------------------------------
// Test: authorization is checked before the body is parsed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_wins_over_malformed_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/manufacture/bom/delete")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = common::send(common::default_app(), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_scheme_returns_401() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/manufacture/bom/list")
        .header(AUTHORIZATION, "Basic dmJlbjoxMjM0NTY=")
        .body(Body::empty())
        .unwrap();
    let response = common::send(common::default_app(), request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
}

// ---------------------------------------------------------------------------
// Test: odd query values never fail the list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn garbage_paging_values_are_clamped() {
    let response = get_auth(
        common::default_app(),
        "/api/manufacture/bom/list?page=abc&pageSize=-5&sortOrder=sideways&sortBy=noSuchField",
        &token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 3);
    // page falls back to 1, pageSize clamps up to 1.
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
}
