//! Integration tests for tag CRUD, uniqueness, and the delete cascade.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_tag_with_location() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, user_id, _) = app.register_user().await;

    let name = common::unique_name("urgent");
    let response = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "name": name })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["name"], name);
    assert_eq!(response.body["data"]["owner_id"], user_id);

    let id = response.body["data"]["id"].as_str().expect("id");
    let location = response
        .headers
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert_eq!(location, format!("/api/tags/{id}"));
}

#[tokio::test]
async fn test_tag_name_unique_per_owner_only() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token_a, _, _) = app.register_user().await;
    let (token_b, _, _) = app.register_user().await;

    let name = common::unique_name("shared");

    let first = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "name": name })),
            Some(&token_a),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let duplicate = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "name": name })),
            Some(&token_a),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let other_owner = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "name": name })),
            Some(&token_b),
        )
        .await;
    assert_eq!(other_owner.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_rename_tag_validates_name() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let id = app.create_tag(&token, &common::unique_name("old")).await;

    let empty = app
        .request(
            "PUT",
            &format!("/api/tags/{id}"),
            Some(json!({ "name": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let new_name = common::unique_name("new");
    let renamed = app
        .request(
            "PUT",
            &format!("/api/tags/{id}"),
            Some(json!({ "name": new_name })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["name"], new_name);
}

#[tokio::test]
async fn test_delete_tag_removes_only_that_reference() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let doomed = app.create_tag(&token, &common::unique_name("doomed")).await;
    let survivor = app
        .create_tag(&token, &common::unique_name("survivor"))
        .await;

    let note_id = app
        .create_note(
            &token,
            json!({ "title": "tagged note", "tags": [doomed, survivor] }),
        )
        .await;

    let response = app
        .request("DELETE", &format!("/api/tags/{doomed}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    // The note survives with only the sibling tag attached.
    let note = app.get_note(&token, &note_id).await;
    assert_eq!(note.status, StatusCode::OK);
    let tag_ids = note.body["data"]["tag_ids"].as_array().expect("tags");
    assert_eq!(tag_ids.len(), 1);
    assert_eq!(tag_ids[0], survivor.as_str());

    // The tag itself no longer resolves.
    let lookup = app
        .request("GET", &format!("/api/tags/{doomed}"), None, Some(&token))
        .await;
    assert_eq!(lookup.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_tags_scoped_to_owner() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token_a, user_a, _) = app.register_user().await;
    let (token_b, _, _) = app.register_user().await;

    app.create_tag(&token_a, &common::unique_name("mine")).await;
    app.create_tag(&token_b, &common::unique_name("theirs")).await;

    let response = app.request("GET", "/api/tags", None, Some(&token_a)).await;
    assert_eq!(response.status, StatusCode::OK);

    let tags = response.body["data"].as_array().expect("array");
    assert!(!tags.is_empty());
    for tag in tags {
        assert_eq!(tag["owner_id"], user_a);
    }
}
