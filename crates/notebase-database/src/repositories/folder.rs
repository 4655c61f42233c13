//! Folder repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use notebase_core::error::{AppError, ErrorKind};
use notebase_core::result::AppResult;
use notebase_entity::folder::{CreateFolder, Folder};

/// Repository for owner-scoped folder CRUD.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List all folders owned by a user.
    pub async fn find_all(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE owner_id = $1 ORDER BY name ASC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, owner_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(translate_name_conflict)
    }

    /// Rename a folder, scoped to its owner.
    pub async fn rename(&self, owner_id: Uuid, id: Uuid, new_name: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate_name_conflict)
    }

    /// Delete a folder, scoped to its owner. Returns whether a row was removed.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

/// Map the per-owner unique name constraint to a conflict error.
fn translate_name_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("folders_owner_id_name_key") =>
        {
            AppError::conflict("name already exists")
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to write folder", e),
    }
}
