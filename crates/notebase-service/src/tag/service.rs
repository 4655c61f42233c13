//! Tag CRUD with owner scoping and the delete cascade.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use notebase_core::error::AppError;
use notebase_database::repositories::note::NoteRepository;
use notebase_database::repositories::tag::TagRepository;
use notebase_entity::tag::{CreateTag, Tag};

use crate::context::RequestContext;

/// Manages tag CRUD operations.
///
/// Tags carry the same invariants as folders: per-owner unique names, and
/// a delete cascade that removes the tag from every referencing note's
/// tag set while leaving the notes themselves untouched.
#[derive(Debug, Clone)]
pub struct TagService {
    /// Tag repository.
    tag_repo: Arc<TagRepository>,
    /// Note repository (for the reference-removal cascade).
    note_repo: Arc<NoteRepository>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tag_repo: Arc<TagRepository>, note_repo: Arc<NoteRepository>) -> Self {
        Self {
            tag_repo,
            note_repo,
        }
    }

    /// Lists the caller's tags.
    pub async fn list_tags(&self, ctx: &RequestContext) -> Result<Vec<Tag>, AppError> {
        self.tag_repo.find_all(ctx.user_id).await
    }

    /// Gets a tag by ID, owner-scoped.
    pub async fn get_tag(&self, ctx: &RequestContext, tag_id: Uuid) -> Result<Tag, AppError> {
        self.tag_repo
            .find_by_id(ctx.user_id, tag_id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found"))
    }

    /// Creates a new tag.
    pub async fn create_tag(&self, ctx: &RequestContext, name: &str) -> Result<Tag, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }

        let tag = self
            .tag_repo
            .create(&CreateTag {
                name: name.to_string(),
                owner_id: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, tag_id = %tag.id, "Tag created");

        Ok(tag)
    }

    /// Renames a tag. Per-owner name uniqueness applies exactly as on
    /// create.
    pub async fn rename_tag(
        &self,
        ctx: &RequestContext,
        tag_id: Uuid,
        new_name: &str,
    ) -> Result<Tag, AppError> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("Tag name cannot be empty"));
        }

        let tag = self
            .tag_repo
            .rename(ctx.user_id, tag_id, new_name)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found"))?;

        info!(user_id = %ctx.user_id, tag_id = %tag_id, new_name = %new_name, "Tag renamed");

        Ok(tag)
    }

    /// Deletes a tag, then removes it from every owned note's tag set.
    ///
    /// Sequential statements, not one transaction; see the folder cascade
    /// for the same trade-off.
    pub async fn delete_tag(&self, ctx: &RequestContext, tag_id: Uuid) -> Result<(), AppError> {
        let deleted = self.tag_repo.delete(ctx.user_id, tag_id).await?;
        if !deleted {
            return Err(AppError::not_found("Tag not found"));
        }

        let removed = self.note_repo.remove_tag_refs(ctx.user_id, tag_id).await?;

        info!(
            user_id = %ctx.user_id,
            tag_id = %tag_id,
            refs_removed = removed,
            "Tag deleted"
        );

        Ok(())
    }
}
