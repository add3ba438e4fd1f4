//! Integration tests for mock login and bearer-token enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use mdm_api::auth::jwt::validate_token;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: each mock account can log in
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_issues_token_for_every_mock_account() {
    for (username, role) in [("vben", "super"), ("admin", "admin"), ("jack", "user")] {
        let response = post_json(
            common::default_app(),
            "/api/auth/login",
            json!({ "username": username, "password": "123456" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "login as {username}");

        let json = body_json(response).await;
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"]["username"], username);
        assert_eq!(json["data"]["roles"], json!([role]));

        let token = json["data"]["accessToken"].as_str().unwrap();
        let claims = validate_token(token, &common::test_config().jwt).unwrap();
        assert_eq!(claims.sub, username);
        assert_eq!(claims.role, role);
    }
}

// ---------------------------------------------------------------------------
// Test: wrong password is rejected with 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_with_wrong_password_returns_401() {
    let response = post_json(
        common::default_app(),
        "/api/auth/login",
        json!({ "username": "vben", "password": "wrong" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 401);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Username or password is incorrect");
}

// ---------------------------------------------------------------------------
// Test: missing credentials are a 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_without_credentials_returns_400() {
    let response = post_json(common::default_app(), "/api/auth/login", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert_eq!(json["message"], "Username and password are required");
}

// ---------------------------------------------------------------------------
// Test: protected routes require a bearer token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_without_token_returns_401_envelope() {
    let response = get(common::default_app(), "/api/manufacture/bom/list").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 401);
    assert!(json["data"].is_null());
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Missing Authorization header");
}

#[tokio::test]
async fn list_with_garbage_token_returns_401() {
    let response = get_auth(
        common::default_app(),
        "/api/manufacture/material/list",
        "not-a-jwt",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Test: a token from the login endpoint unlocks protected routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn token_from_login_is_accepted() {
    let login = post_json(
        common::default_app(),
        "/api/auth/login",
        json!({ "username": "jack", "password": "123456" }),
    )
    .await;
    let token = body_json(login).await["data"]["accessToken"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(common::default_app(), "/api/manufacture/bom/list", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
