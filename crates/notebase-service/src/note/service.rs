//! Note CRUD and search with ownership and referential-integrity checks.
//!
//! Every cross-entity reference in an incoming payload is validated here
//! before anything is written: identifiers must be well-formed, and the
//! referenced folder/tags must exist under the calling user. Integrity
//! failures short-circuit before any mutation, so a rejected request
//! never leaves a partial write behind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use notebase_core::error::AppError;
use notebase_core::types::{RefPatch, parse_id, parse_optional_ref};
use notebase_database::repositories::folder::FolderRepository;
use notebase_database::repositories::note::NoteRepository;
use notebase_database::repositories::tag::TagRepository;
use notebase_entity::note::{CreateNote, Note, NoteFilter, UpdateNote};

use crate::context::RequestContext;

/// Manages note CRUD and search.
#[derive(Debug, Clone)]
pub struct NoteService {
    /// Note repository.
    note_repo: Arc<NoteRepository>,
    /// Folder repository (reference validation).
    folder_repo: Arc<FolderRepository>,
    /// Tag repository (reference validation).
    tag_repo: Arc<TagRepository>,
}

/// Request to create a new note, as received from the boundary.
///
/// Reference fields arrive as raw strings: an empty `folder_id` means "no
/// folder", and a caller-supplied `owner_id` is only accepted when it
/// matches the trusted session owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    /// Note title.
    pub title: Option<String>,
    /// Note body.
    pub content: Option<String>,
    /// Folder reference; empty string is normalized to "no folder".
    pub folder_id: Option<String>,
    /// Tag references.
    pub tags: Option<Vec<String>>,
    /// Caller-supplied owner, validated against the session owner.
    pub owner_id: Option<String>,
}

/// Partial update to a note. Absent fields are left untouched; an empty
/// `folder_id` clears the folder reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    /// New title (cannot be cleared).
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// Folder change: empty string unsets, a UUID re-points.
    pub folder_id: Option<String>,
    /// Full replacement of the tag set.
    pub tags: Option<Vec<String>>,
    /// Caller-supplied owner; any value other than the session owner is
    /// rejected (ownership transfer is never permitted).
    pub owner_id: Option<String>,
}

/// Raw query filters for listing/searching notes.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// Case-insensitive substring over title or content.
    pub search_term: Option<String>,
    /// Exact folder reference.
    pub folder_id: Option<String>,
    /// Exact tag reference.
    pub tag_id: Option<String>,
}

impl NoteService {
    /// Creates a new note service.
    pub fn new(
        note_repo: Arc<NoteRepository>,
        folder_repo: Arc<FolderRepository>,
        tag_repo: Arc<TagRepository>,
    ) -> Self {
        Self {
            note_repo,
            folder_repo,
            tag_repo,
        }
    }

    /// Lists the caller's notes, newest update first.
    ///
    /// Foreign-owned notes are silently excluded (never an error), and an
    /// empty result is an empty list.
    pub async fn find_notes(
        &self,
        ctx: &RequestContext,
        query: NoteQuery,
    ) -> Result<Vec<Note>, AppError> {
        let filter = NoteFilter {
            search_term: query.search_term.filter(|s| !s.is_empty()),
            folder_id: parse_optional_ref(query.folder_id.as_deref())?,
            tag_id: parse_optional_ref(query.tag_id.as_deref())?,
        };

        self.note_repo.find(ctx.user_id, &filter).await
    }

    /// Gets a note by ID, owner-scoped.
    pub async fn get_note(&self, ctx: &RequestContext, note_id: Uuid) -> Result<Note, AppError> {
        self.note_repo
            .find_by_id(ctx.user_id, note_id)
            .await?
            .ok_or_else(|| AppError::not_found("Note not found"))
    }

    /// Creates a new note. The persisted owner is always the trusted
    /// session owner, regardless of the payload.
    pub async fn create_note(
        &self,
        ctx: &RequestContext,
        req: CreateNoteRequest,
    ) -> Result<Note, AppError> {
        reject_foreign_owner(ctx, req.owner_id.as_deref())?;

        let title = req.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(AppError::validation("missing title"));
        }

        let folder_id = parse_optional_ref(req.folder_id.as_deref())?;
        if let Some(folder_id) = folder_id {
            self.require_owned_folder(ctx, folder_id).await?;
        }

        let tag_ids = parse_tag_ids(req.tags.as_deref().unwrap_or_default())?;
        self.require_owned_tags(ctx, &tag_ids).await?;

        let note = self
            .note_repo
            .create(&CreateNote {
                title,
                content: req.content,
                folder_id,
                tag_ids,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, note_id = %note.id, "Note created");

        Ok(note)
    }

    /// Applies a partial update to a note.
    ///
    /// A note owned by another user reports the same not-found as a note
    /// that does not exist. All reference validation completes before the
    /// write; `updated_at` strictly increases on success.
    pub async fn update_note(
        &self,
        ctx: &RequestContext,
        note_id: Uuid,
        req: UpdateNoteRequest,
    ) -> Result<Note, AppError> {
        // Owner-scoped existence check first: a foreign note must 404
        // before any of the patch itself is inspected.
        self.get_note(ctx, note_id).await?;

        reject_foreign_owner(ctx, req.owner_id.as_deref())?;

        if let Some(title) = &req.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("title cannot be empty"));
            }
        }

        let folder_patch = match req.folder_id.as_deref() {
            None => None,
            Some(raw) => Some(RefPatch::parse(raw)?),
        };
        if let Some(RefPatch::Set(folder_id)) = folder_patch {
            self.require_owned_folder(ctx, folder_id).await?;
        }

        let tag_ids = match req.tags.as_deref() {
            None => None,
            Some(raw) => {
                let ids = parse_tag_ids(raw)?;
                self.require_owned_tags(ctx, &ids).await?;
                Some(ids)
            }
        };

        let patch = UpdateNote {
            title: req.title,
            content: req.content,
            folder_id: folder_patch.map(|p| p.target()),
            tag_ids,
        };

        let note = self
            .note_repo
            .update(ctx.user_id, note_id, &patch)
            .await?
            .ok_or_else(|| AppError::not_found("Note not found"))?;

        info!(user_id = %ctx.user_id, note_id = %note_id, "Note updated");

        Ok(note)
    }

    /// Deletes a note, owner-scoped.
    ///
    /// The store-level delete is idempotent; zero affected rows surfaces
    /// as not-found so the boundary can answer 404 for an id that was
    /// well-formed but absent (or foreign-owned).
    pub async fn delete_note(&self, ctx: &RequestContext, note_id: Uuid) -> Result<(), AppError> {
        let deleted = self.note_repo.delete(ctx.user_id, note_id).await?;
        if !deleted {
            return Err(AppError::not_found("Note not found"));
        }

        info!(user_id = %ctx.user_id, note_id = %note_id, "Note deleted");

        Ok(())
    }

    /// Ensure the folder reference resolves under the calling user.
    async fn require_owned_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<(), AppError> {
        self.folder_repo
            .find_by_id(ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::integrity("folder not found"))?;
        Ok(())
    }

    /// Ensure every tag reference resolves under the calling user; the
    /// error enumerates the offending ids.
    async fn require_owned_tags(
        &self,
        ctx: &RequestContext,
        tag_ids: &[Uuid],
    ) -> Result<(), AppError> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        let owned = self.tag_repo.find_owned_ids(ctx.user_id, tag_ids).await?;
        let missing: Vec<String> = tag_ids
            .iter()
            .filter(|id| !owned.contains(id))
            .map(Uuid::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::integrity("tag not found")
                .with_details(serde_json::json!({ "missing_tags": missing })));
        }

        Ok(())
    }
}

/// Reject a payload-supplied owner that conflicts with the trusted session
/// owner. A value that does not even parse as an id cannot be the session
/// owner, so it lands in the same arm.
fn reject_foreign_owner(ctx: &RequestContext, claimed: Option<&str>) -> Result<(), AppError> {
    match claimed {
        None => Ok(()),
        Some(raw) if parse_id(raw).is_ok_and(|id| id == ctx.user_id) => Ok(()),
        Some(_) => Err(AppError::forbidden(
            "owner_id does not match the authenticated user",
        )),
    }
}

/// Parse and deduplicate raw tag ids; any malformed entry rejects the
/// whole payload before the store is touched.
fn parse_tag_ids(raw: &[String]) -> Result<Vec<Uuid>, AppError> {
    let mut tag_ids = Vec::with_capacity(raw.len());
    for value in raw {
        let id = parse_id(value)?;
        if !tag_ids.contains(&id) {
            tag_ids.push(id);
        }
    }
    Ok(tag_ids)
}
