//! Tag CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use uuid::Uuid;

use notebase_core::error::AppError;
use notebase_entity::tag::Tag;

use crate::dto::request::{CreateNamedRequest, RenameNamedRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Tag>>>, AppError> {
    let tags = state.tag_service.list_tags(&auth).await?;
    Ok(Json(ApiResponse::ok(tags)))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    let tag = state.tag_service.get_tag(&auth, id).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateNamedRequest>,
) -> Result<impl IntoResponse, AppError> {
    let tag = state
        .tag_service
        .create_tag(&auth, req.name.as_deref().unwrap_or(""))
        .await?;

    let location = format!("/api/tags/{}", tag.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::ok(tag)),
    ))
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameNamedRequest>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    let tag = state
        .tag_service
        .rename_tag(&auth, id, req.name.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.tag_service.delete_tag(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
