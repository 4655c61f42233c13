//! Folder CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use uuid::Uuid;

use notebase_core::error::AppError;
use notebase_entity::folder::Folder;

use crate::dto::request::{CreateNamedRequest, RenameNamedRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Folder>>>, AppError> {
    let folders = state.folder_service.list_folders(&auth).await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Folder>>, AppError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNamedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let folder = state
        .folder_service
        .create_folder(&auth, req.name.as_deref().unwrap_or(""))
        .await?;

    let location = format!("/api/folders/{}", folder.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::ok(folder)),
    ))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameNamedRequest>,
) -> Result<Json<ApiResponse<Folder>>, AppError> {
    let folder = state
        .folder_service
        .rename_folder(&auth, id, req.name.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
