//! Note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A note with an optional folder reference and an unordered tag set.
///
/// Both references always point at entities owned by the same user; the
/// service layer validates this before any write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    /// Unique note identifier.
    pub id: Uuid,
    /// Note title.
    pub title: String,
    /// Note body (optional).
    pub content: Option<String>,
    /// Folder this note lives in, if any.
    pub folder_id: Option<Uuid>,
    /// Tags referenced by this note. Order is not meaningful.
    pub tag_ids: Vec<Uuid>,
    /// The note owner.
    pub owner_id: Uuid,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Whether this note references the given tag.
    pub fn has_tag(&self, tag_id: Uuid) -> bool {
        self.tag_ids.contains(&tag_id)
    }
}

/// Data required to create a new note. References are already validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNote {
    /// Note title.
    pub title: String,
    /// Note body (optional).
    pub content: Option<String>,
    /// Validated folder reference (None for no folder).
    pub folder_id: Option<Uuid>,
    /// Validated, deduplicated tag references.
    pub tag_ids: Vec<Uuid>,
    /// The note owner.
    pub owner_id: Uuid,
}

/// Partial update applied to an existing note.
///
/// `None` means "leave the stored value untouched". The folder field uses
/// a nested option so that clearing the reference (`Some(None)`) stays
/// distinct from omitting it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNote {
    /// New title.
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// Folder change: `Some(None)` clears, `Some(Some(id))` re-points.
    pub folder_id: Option<Option<Uuid>>,
    /// Full replacement of the tag reference set.
    pub tag_ids: Option<Vec<Uuid>>,
}

/// Owner-scoped filters for listing and searching notes.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title or content.
    pub search_term: Option<String>,
    /// Exact folder reference match.
    pub folder_id: Option<Uuid>,
    /// Exact tag reference match.
    pub tag_id: Option<Uuid>,
}
