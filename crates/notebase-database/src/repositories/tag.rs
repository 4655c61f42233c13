//! Tag repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use notebase_core::error::{AppError, ErrorKind};
use notebase_core::result::AppResult;
use notebase_entity::tag::{CreateTag, Tag};

/// Repository for owner-scoped tag CRUD.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a tag by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    /// List all tags owned by a user.
    pub async fn find_all(&self, owner_id: Uuid) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE owner_id = $1 ORDER BY name ASC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    /// Of the given candidate ids, return those that resolve to tags owned
    /// by the user. Used to enumerate dangling references before a write.
    pub async fn find_owned_ids(&self, owner_id: Uuid, ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM tags WHERE owner_id = $1 AND id = ANY($2)",
        )
        .bind(owner_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve tag ids", e))
    }

    /// Create a new tag.
    pub async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (name, owner_id) VALUES ($1, $2) RETURNING *")
            .bind(&data.name)
            .bind(data.owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(translate_name_conflict)
    }

    /// Rename a tag, scoped to its owner.
    pub async fn rename(&self, owner_id: Uuid, id: Uuid, new_name: &str) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate_name_conflict)
    }

    /// Delete a tag, scoped to its owner. Returns whether a row was removed.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Map the per-owner unique name constraint to a conflict error.
fn translate_name_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("tags_owner_id_name_key") =>
        {
            AppError::conflict("name already exists")
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to write tag", e),
    }
}
