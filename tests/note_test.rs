//! Integration tests for note CRUD, reference validation, and search.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .expect("timestamp")
}

#[tokio::test]
async fn test_create_note_forces_trusted_owner() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, user_id, _) = app.register_user().await;

    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "First note" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["title"], "First note");
    assert_eq!(data["owner_id"], user_id);
    assert!(data["folder_id"].is_null());
    assert_eq!(data["tag_ids"].as_array().expect("tags").len(), 0);
    assert!(data["id"].is_string());
    assert!(data["created_at"].is_string());

    let id = data["id"].as_str().expect("id");
    let location = response
        .headers
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert_eq!(location, format!("/api/notes/{id}"));
}

#[tokio::test]
async fn test_create_note_requires_title() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let missing = app
        .request("POST", "/api/notes", Some(json!({})), Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body["message"], "missing title");

    let empty = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_note_empty_folder_id_means_no_folder() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "No folder", "folder_id": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["data"]["folder_id"].is_null());
}

#[tokio::test]
async fn test_create_note_rejects_malformed_references() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let folder = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "x", "folder_id": "not-a-uuid" })),
            Some(&token),
        )
        .await;
    assert_eq!(folder.status, StatusCode::BAD_REQUEST);
    assert_eq!(folder.body["message"], "invalid id");

    let tag = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "x", "tags": ["not-a-uuid"] })),
            Some(&token),
        )
        .await;
    assert_eq!(tag.status, StatusCode::BAD_REQUEST);
    assert_eq!(tag.body["message"], "invalid id");
}

#[tokio::test]
async fn test_create_note_unresolved_folder_unprocessable() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "x", "folder_id": Uuid::new_v4().to_string() })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "folder not found");
}

#[tokio::test]
async fn test_create_note_foreign_folder_unprocessable() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token_a, _, _) = app.register_user().await;
    let (token_b, _, _) = app.register_user().await;

    let foreign_folder = app
        .create_folder(&token_b, &common::unique_name("B folder"))
        .await;

    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "x", "folder_id": foreign_folder })),
            Some(&token_a),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_note_enumerates_missing_tags() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let known = app.create_tag(&token, &common::unique_name("known")).await;
    let unknown = Uuid::new_v4().to_string();

    let response = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "x", "tags": [known, unknown] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "tag not found");

    let missing = response.body["details"]["missing_tags"]
        .as_array()
        .expect("missing tags");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0], unknown.as_str());
}

#[tokio::test]
async fn test_create_note_owner_in_body() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, user_id, _) = app.register_user().await;

    // Matching owner is accepted.
    let own = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "mine", "owner_id": user_id })),
            Some(&token),
        )
        .await;
    assert_eq!(own.status, StatusCode::CREATED);

    // Any other identity is forbidden.
    let foreign = app
        .request(
            "POST",
            "/api/notes",
            Some(json!({ "title": "theirs", "owner_id": Uuid::new_v4().to_string() })),
            Some(&token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_note_partial_semantics() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let id = app
        .create_note(&token, json!({ "title": "Original", "content": "body" }))
        .await;
    let created = app.get_note(&token, &id).await;
    let first_updated_at = parse_time(&created.body["data"]["updated_at"]);

    // Patch only the title: content must survive.
    let response = app
        .request(
            "PATCH",
            &format!("/api/notes/{id}"),
            Some(json!({ "title": "Renamed" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Renamed");
    assert_eq!(response.body["data"]["content"], "body");

    let second_updated_at = parse_time(&response.body["data"]["updated_at"]);
    assert!(second_updated_at > first_updated_at);
}

#[tokio::test]
async fn test_update_note_cannot_clear_title() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let id = app.create_note(&token, json!({ "title": "Keep me" })).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/notes/{id}"),
            Some(json!({ "title": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Nothing was written.
    let note = app.get_note(&token, &id).await;
    assert_eq!(note.body["data"]["title"], "Keep me");
}

#[tokio::test]
async fn test_update_note_empty_folder_id_clears_reference() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let folder_id = app
        .create_folder(&token, &common::unique_name("Home"))
        .await;
    let id = app
        .create_note(&token, json!({ "title": "Filed", "folder_id": folder_id }))
        .await;

    // Omitting the field leaves the reference untouched.
    let untouched = app
        .request(
            "PATCH",
            &format!("/api/notes/{id}"),
            Some(json!({ "content": "still filed" })),
            Some(&token),
        )
        .await;
    assert_eq!(untouched.body["data"]["folder_id"], folder_id.as_str());

    // An empty string unsets it.
    let cleared = app
        .request(
            "PATCH",
            &format!("/api/notes/{id}"),
            Some(json!({ "folder_id": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["data"]["folder_id"].is_null());
}

#[tokio::test]
async fn test_update_note_revalidates_references() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let id = app.create_note(&token, json!({ "title": "x" })).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/notes/{id}"),
            Some(json!({ "folder_id": Uuid::new_v4().to_string() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let note = app.get_note(&token, &id).await;
    assert!(note.body["data"]["folder_id"].is_null());
}

#[tokio::test]
async fn test_update_note_replaces_tag_set() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let first = app.create_tag(&token, &common::unique_name("first")).await;
    let second = app.create_tag(&token, &common::unique_name("second")).await;

    let id = app
        .create_note(&token, json!({ "title": "x", "tags": [first] }))
        .await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/notes/{id}"),
            Some(json!({ "tags": [second] })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let tag_ids = response.body["data"]["tag_ids"].as_array().expect("tags");
    assert_eq!(tag_ids.len(), 1);
    assert_eq!(tag_ids[0], second.as_str());
}

#[tokio::test]
async fn test_update_note_rejects_ownership_transfer() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let id = app.create_note(&token, json!({ "title": "Held" })).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/notes/{id}"),
            Some(json!({ "title": "Taken", "owner_id": Uuid::new_v4().to_string() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The record is unchanged.
    let note = app.get_note(&token, &id).await;
    assert_eq!(note.body["data"]["title"], "Held");
}

#[tokio::test]
async fn test_delete_note() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let id = app.create_note(&token, json!({ "title": "Temporary" })).await;

    let response = app
        .request("DELETE", &format!("/api/notes/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_null());

    let lookup = app.get_note(&token, &id).await;
    assert_eq!(lookup.status, StatusCode::NOT_FOUND);

    let again = app
        .request("DELETE", &format!("/api/notes/{id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_ordered() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let in_title = app
        .create_note(&token, json!({ "title": "Lady Gaga setlist" }))
        .await;
    let in_content = app
        .create_note(
            &token,
            json!({ "title": "Concert notes", "content": "opening act before LADY GAGA came on" }),
        )
        .await;
    app.create_note(&token, json!({ "title": "Grocery list" }))
        .await;

    let response = app
        .request("GET", "/api/notes?q=lady%20gaga", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let notes = response.body["data"].as_array().expect("array");
    assert_eq!(notes.len(), 2);

    // Ordered by updated_at descending: the later note first.
    assert_eq!(notes[0]["id"], in_content.as_str());
    assert_eq!(notes[1]["id"], in_title.as_str());

    let first = parse_time(&notes[0]["updated_at"]);
    let second = parse_time(&notes[1]["updated_at"]);
    assert!(first >= second);
}

#[tokio::test]
async fn test_list_filters_by_folder_and_tag() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    let folder = app
        .create_folder(&token, &common::unique_name("Filtered"))
        .await;
    let tag = app.create_tag(&token, &common::unique_name("marked")).await;

    let in_folder = app
        .create_note(&token, json!({ "title": "filed", "folder_id": folder }))
        .await;
    let tagged = app
        .create_note(&token, json!({ "title": "tagged", "tags": [tag] }))
        .await;
    app.create_note(&token, json!({ "title": "plain" })).await;

    let by_folder = app
        .request(
            "GET",
            &format!("/api/notes?folder_id={folder}"),
            None,
            Some(&token),
        )
        .await;
    let notes = by_folder.body["data"].as_array().expect("array");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], in_folder.as_str());

    let by_tag = app
        .request(
            "GET",
            &format!("/api/notes?tag_id={tag}"),
            None,
            Some(&token),
        )
        .await;
    let notes = by_tag.body["data"].as_array().expect("array");
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], tagged.as_str());
}

#[tokio::test]
async fn test_search_without_match_is_empty_not_error() {
    let Some(app) = common::TestApp::spawn().await else {
        return;
    };
    let (token, _, _) = app.register_user().await;

    app.create_note(&token, json!({ "title": "Something" })).await;

    let response = app
        .request(
            "GET",
            "/api/notes?q=definitely-not-present",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().expect("array").len(), 0);
}
