//! Folder CRUD with owner scoping and the delete cascade.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use notebase_core::error::AppError;
use notebase_database::repositories::folder::FolderRepository;
use notebase_database::repositories::note::NoteRepository;
use notebase_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;

/// Manages folder CRUD operations.
///
/// Folder names are unique per owner; deleting a folder clears the folder
/// reference on every owned note pointing at it, without deleting the
/// notes themselves.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// Note repository (for the reference-removal cascade).
    note_repo: Arc<NoteRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, note_repo: Arc<NoteRepository>) -> Self {
        Self {
            folder_repo,
            note_repo,
        }
    }

    /// Lists the caller's folders.
    pub async fn list_folders(&self, ctx: &RequestContext) -> Result<Vec<Folder>, AppError> {
        self.folder_repo.find_all(ctx.user_id).await
    }

    /// Gets a folder by ID. A folder owned by another user reports the
    /// same not-found as a folder that does not exist.
    pub async fn get_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Folder, AppError> {
        self.folder_repo
            .find_by_id(ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Creates a new folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<Folder, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name: name.to_string(),
                owner_id: ctx.user_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, "Folder created");

        Ok(folder)
    }

    /// Renames a folder. Per-owner name uniqueness applies exactly as on
    /// create.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> Result<Folder, AppError> {
        if new_name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }

        let folder = self
            .folder_repo
            .rename(ctx.user_id, folder_id, new_name)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        info!(user_id = %ctx.user_id, folder_id = %folder_id, new_name = %new_name, "Folder renamed");

        Ok(folder)
    }

    /// Deletes a folder, then clears the folder reference on every owned
    /// note that pointed at it.
    ///
    /// The two statements are sequential, not one transaction: a crash
    /// between them leaves the deleted id transiently referenced.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<(), AppError> {
        let deleted = self.folder_repo.delete(ctx.user_id, folder_id).await?;
        if !deleted {
            return Err(AppError::not_found("Folder not found"));
        }

        let unset = self
            .note_repo
            .unset_folder_refs(ctx.user_id, folder_id)
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            notes_unset = unset,
            "Folder deleted"
        );

        Ok(())
    }
}
