//! Note CRUD and search handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use uuid::Uuid;

use notebase_core::error::AppError;
use notebase_entity::note::Note;
use notebase_service::note::service::{CreateNoteRequest, NoteQuery, UpdateNoteRequest};

use crate::dto::request::{CreateNoteBody, NoteListParams, UpdateNoteBody};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notes?q=&folder_id=&tag_id=
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<NoteListParams>,
) -> Result<Json<ApiResponse<Vec<Note>>>, AppError> {
    let notes = state
        .note_service
        .find_notes(
            &auth,
            NoteQuery {
                search_term: params.q,
                folder_id: params.folder_id,
                tag_id: params.tag_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(notes)))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Note>>, AppError> {
    let note = state.note_service.get_note(&auth, id).await?;
    Ok(Json(ApiResponse::ok(note)))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNoteBody>,
) -> Result<impl IntoResponse, AppError> {
    let note = state
        .note_service
        .create_note(
            &auth,
            CreateNoteRequest {
                title: req.title,
                content: req.content,
                folder_id: req.folder_id,
                tags: req.tags,
                owner_id: req.owner_id,
            },
        )
        .await?;

    let location = format!("/api/notes/{}", note.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::ok(note)),
    ))
}

/// PUT|PATCH /api/notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteBody>,
) -> Result<Json<ApiResponse<Note>>, AppError> {
    let note = state
        .note_service
        .update_note(
            &auth,
            id,
            UpdateNoteRequest {
                title: req.title,
                content: req.content,
                folder_id: req.folder_id,
                tags: req.tags,
                owner_id: req.owner_id,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(note)))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.note_service.delete_note(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
