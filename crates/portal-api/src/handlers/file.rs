//! File handlers — listing, multipart upload, download, delete.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use uuid::Uuid;

use portal_core::error::AppError;

use crate::error::ApiError;
use portal_entity::file::ClientFile;
use portal_service::file::service::UploadFileRequest;

use crate::dto::request::FileListQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files?client_name=...&folder_id=...&unfiled=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FileListQuery>,
) -> Result<Json<ApiResponse<Vec<ClientFile>>>, ApiError> {
    let files = state
        .file_service
        .list_files(
            &auth,
            query.client_name.as_deref(),
            query.folder_id,
            query.unfiled,
        )
        .await?;
    Ok(Json(ApiResponse::ok(files)))
}

/// POST /api/files/upload — multipart form
///
/// Fields: `file` (required, content with filename), `client_name`
/// (admins only), `folder_id` (optional).
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ClientFile>>, ApiError> {
    let mut file_name: Option<String> = None;
    let mut data: Option<Bytes> = None;
    let mut client_name: Option<String> = None;
    let mut folder_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                file_name = field.file_name().map(String::from);
                data = Some(field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read file field: {e}"))
                })?);
            }
            Some("client_name") => {
                client_name = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid client_name field: {e}"))
                })?);
            }
            Some("folder_id") => {
                let raw = field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid folder_id field: {e}"))
                })?;
                folder_id = Some(
                    raw.parse::<Uuid>()
                        .map_err(|_| AppError::validation("Invalid folder_id"))?,
                );
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("File field is required"))?;
    let data = data.ok_or_else(|| AppError::validation("File field is required"))?;

    let record = state
        .file_service
        .upload_file(
            &auth,
            UploadFileRequest {
                client_name,
                file_name,
                folder_id,
                data,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(record)))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let result = state.file_service.download_file(&auth, id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&result.file.file_name),
        )
        .header(header::CONTENT_LENGTH, result.data.len())
        .body(Body::from(result.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Builds the Content-Disposition value for a download. Backslashes and
/// quotes in the stored file name must be escaped or they break the
/// quoted-string.
fn content_disposition(file_name: &str) -> String {
    let escaped = file_name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("attachment; filename=\"{escaped}\"")
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "File deleted".to_string(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_content_disposition_plain_name() {
        assert_eq!(
            content_disposition("balance.pdf"),
            "attachment; filename=\"balance.pdf\""
        );
    }

    #[test]
    fn test_content_disposition_escapes_quotes_and_backslashes() {
        assert_eq!(
            content_disposition(r#"acta "final".pdf"#),
            r#"attachment; filename="acta \"final\".pdf""#
        );
        assert_eq!(
            content_disposition(r"c:\temp\acta.pdf"),
            r#"attachment; filename="c:\\temp\\acta.pdf""#
        );
    }

    #[test]
    fn test_content_disposition_is_valid_header_value() {
        let value = content_disposition(r#"acta "final".pdf"#);
        assert!(HeaderValue::from_str(&value).is_ok());
    }
}
