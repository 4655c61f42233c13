//! Note repository implementation.
//!
//! Notes are read back with their tag reference set aggregated from the
//! join table, so every query that returns a [`Note`] goes through the
//! same aggregating SELECT.

use sqlx::PgPool;
use uuid::Uuid;

use notebase_core::error::{AppError, ErrorKind};
use notebase_core::result::AppResult;
use notebase_entity::note::{CreateNote, Note, NoteFilter, UpdateNote};

const NOTE_COLUMNS: &str = "n.id, n.title, n.content, n.folder_id, n.owner_id, \
     n.created_at, n.updated_at, \
     COALESCE(ARRAY_AGG(nt.tag_id) FILTER (WHERE nt.tag_id IS NOT NULL), '{}') AS tag_ids";

/// Repository for owner-scoped note CRUD and search.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Create a new note repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a note by ID, scoped to its owner.
    pub async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Note>> {
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes n \
             LEFT JOIN note_tags nt ON nt.note_id = n.id \
             WHERE n.id = $1 AND n.owner_id = $2 \
             GROUP BY n.id"
        );
        sqlx::query_as::<_, Note>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find note", e))
    }

    /// List the notes owned by a user, newest update first.
    ///
    /// The filter is applied entirely in SQL: substring match against
    /// title or content, exact folder reference, exact tag reference.
    pub async fn find(&self, owner_id: Uuid, filter: &NoteFilter) -> AppResult<Vec<Note>> {
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes n \
             LEFT JOIN note_tags nt ON nt.note_id = n.id \
             WHERE n.owner_id = $1 \
               AND ($2::text IS NULL \
                    OR n.title ILIKE '%' || $2 || '%' \
                    OR n.content ILIKE '%' || $2 || '%') \
               AND ($3::uuid IS NULL OR n.folder_id = $3) \
               AND ($4::uuid IS NULL OR EXISTS ( \
                    SELECT 1 FROM note_tags x \
                    WHERE x.note_id = n.id AND x.tag_id = $4)) \
             GROUP BY n.id \
             ORDER BY n.updated_at DESC"
        );
        sqlx::query_as::<_, Note>(&sql)
            .bind(owner_id)
            .bind(filter.search_term.as_deref())
            .bind(filter.folder_id)
            .bind(filter.tag_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notes", e))
    }

    /// Create a new note along with its tag references.
    pub async fn create(&self, data: &CreateNote) -> AppResult<Note> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO notes (title, content, folder_id, owner_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.folder_id)
        .bind(data.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create note", e))?;

        self.replace_tag_refs(id, &data.tag_ids).await?;

        self.find_by_id(data.owner_id, id)
            .await?
            .ok_or_else(|| AppError::database("Created note vanished before read-back"))
    }

    /// Apply a partial update, scoped to the owner.
    ///
    /// Returns `None` when no owned note matches the id. Omitted fields
    /// keep their stored values; the folder reference only changes when
    /// the patch carries an explicit folder change.
    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        data: &UpdateNote,
    ) -> AppResult<Option<Note>> {
        let touched: Option<Uuid> = sqlx::query_scalar(
            "UPDATE notes SET \
                title = COALESCE($3, title), \
                content = COALESCE($4, content), \
                folder_id = CASE WHEN $5 THEN $6 ELSE folder_id END, \
                updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING id",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.folder_id.is_some())
        .bind(data.folder_id.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update note", e))?;

        if touched.is_none() {
            return Ok(None);
        }

        if let Some(tag_ids) = &data.tag_ids {
            sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clear tag refs", e)
                })?;
            self.replace_tag_refs(id, tag_ids).await?;
        }

        self.find_by_id(owner_id, id).await
    }

    /// Delete a note, scoped to its owner. Returns whether a row was removed.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete note", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear the folder reference on every owned note pointing at the
    /// given folder. Part of the folder-delete cascade; the notes
    /// themselves are not deleted.
    pub async fn unset_folder_refs(&self, owner_id: Uuid, folder_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notes SET folder_id = NULL WHERE folder_id = $1 AND owner_id = $2",
        )
        .bind(folder_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to unset folder refs", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Remove the given tag from every note's reference set. Part of the
    /// tag-delete cascade; sibling tags on the same notes are untouched.
    pub async fn remove_tag_refs(&self, owner_id: Uuid, tag_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM note_tags USING notes n \
             WHERE note_tags.note_id = n.id \
               AND note_tags.tag_id = $1 \
               AND n.owner_id = $2",
        )
        .bind(tag_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove tag refs", e))?;
        Ok(result.rows_affected())
    }

    /// Insert the tag reference rows for a note.
    async fn replace_tag_refs(&self, note_id: Uuid, tag_ids: &[Uuid]) -> AppResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO note_tags (note_id, tag_id) \
             SELECT $1, UNNEST($2::uuid[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(note_id)
        .bind(tag_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write tag refs", e))?;
        Ok(())
    }
}
