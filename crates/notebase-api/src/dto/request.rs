//! Request DTOs with validation.
//!
//! Fields whose absence has a contract of its own (note title, reference
//! ids, entity names) are optional here so the service layer can answer
//! with its specific validation error instead of a generic body-decode
//! rejection.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create folder/tag request. Both entities share the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNamedRequest {
    /// Entity name.
    pub name: Option<String>,
}

/// Rename folder/tag request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameNamedRequest {
    /// New name.
    pub name: Option<String>,
}

/// Create note request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteBody {
    /// Note title.
    pub title: Option<String>,
    /// Note body.
    pub content: Option<String>,
    /// Folder reference; empty string means "no folder".
    pub folder_id: Option<String>,
    /// Tag references.
    pub tags: Option<Vec<String>>,
    /// Caller-supplied owner (must match the session owner).
    pub owner_id: Option<String>,
}

/// Partial note update request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteBody {
    /// New title.
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// Folder change; empty string clears the reference.
    pub folder_id: Option<String>,
    /// Full replacement of the tag set.
    pub tags: Option<Vec<String>>,
    /// Caller-supplied owner (ownership transfer is rejected).
    pub owner_id: Option<String>,
}

/// Note list/search query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteListParams {
    /// Case-insensitive substring matched against title or content.
    pub q: Option<String>,
    /// Exact folder reference filter.
    pub folder_id: Option<String>,
    /// Exact tag reference filter.
    pub tag_id: Option<String>,
}
