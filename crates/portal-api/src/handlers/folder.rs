//! Folder handlers — listing, tree, create, delete, add-year.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use portal_core::error::AppError;

use crate::error::ApiError;
use portal_entity::folder::Folder;
use portal_entity::folder::tree::FolderTree;
use portal_service::folder::service as folder_service;

use crate::dto::request::{AddYearRequest, ClientQuery, CreateFolderRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/folders?client_name=...
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ClientQuery>,
) -> Result<Json<ApiResponse<Vec<Folder>>>, ApiError> {
    let folders = state
        .folder_service
        .list_folders(&auth, query.client_name.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// GET /api/folders/tree?client_name=...
pub async fn get_tree(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ClientQuery>,
) -> Result<Json<ApiResponse<FolderTree>>, ApiError> {
    let tree = state
        .folder_service
        .get_tree(&auth, query.client_name.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(tree)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .create_folder(
            &auth,
            folder_service::CreateFolderRequest {
                client_name: req.client_name,
                folder_name: req.folder_name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Folder deleted".to_string(),
    })))
}

/// POST /api/folders/add-year
pub async fn add_year(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddYearRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let year_folder = state
        .folder_service
        .add_year(
            &auth,
            folder_service::AddYearRequest {
                client_name: req.client_name,
                year: req.year,
                root: req.root,
                delete_previous: req.delete_previous,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(year_folder)))
}
