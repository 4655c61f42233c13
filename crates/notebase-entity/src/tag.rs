//! Tag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A label a user attaches to notes.
///
/// Same shape and invariants as a folder: the name is unique per owning
/// user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// Tag name.
    pub name: String,
    /// The tag owner.
    pub owner_id: Uuid,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
    /// When the tag was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// Tag name.
    pub name: String,
    /// The tag owner.
    pub owner_id: Uuid,
}
