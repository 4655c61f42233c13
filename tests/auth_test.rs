//! Integration tests for registration, login, refresh, and profile.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_returns_public_representation() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let username = format!("user-{}", Uuid::new_v4());
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": username, "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["username"], username);
    assert!(response.body["data"]["id"].is_string());
    // The password digest never appears in any serialized form.
    assert!(response.body["data"].get("password_hash").is_none());
    assert!(response.body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let username = format!("user-{}", Uuid::new_v4());
    let body = json!({ "username": username, "password": "password123" });

    let first = app
        .request("POST", "/api/auth/register", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request("POST", "/api/auth/register", Some(body), None)
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_padded_username() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": " padded ", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": format!("user-{}", Uuid::new_v4()), "password": "short" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let (_, _, username) = app.register_user().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_user_unauthorized() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody-in-particular", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_authenticated() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let (token, user_id, username) = app.register_user().await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], username);
    assert_eq!(response.body["data"]["id"], user_id);
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_working_tokens() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let username = format!("user-{}", Uuid::new_v4());
    app.request(
        "POST",
        "/api/auth/register",
        Some(json!({ "username": username, "password": "password123" })),
        None,
    )
    .await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": username, "password": "password123" })),
            None,
        )
        .await;
    let refresh_token = login.body["data"]["refresh_token"]
        .as_str()
        .expect("refresh token");

    let refreshed = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::OK);

    // The fresh access token is usable without re-submitting credentials.
    let access = refreshed.body["data"]["access_token"]
        .as_str()
        .expect("access token");
    let me = app.request("GET", "/api/auth/me", None, Some(access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["username"], username);
}

#[tokio::test]
async fn test_access_token_rejected_as_refresh() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };

    let (access_token, _, _) = app.register_user().await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": access_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
