//! Client directory handler (admin only).

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;

use crate::dto::response::{ApiResponse, ClientListResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ClientListResponse>>, ApiError> {
    let clients = state.client_service.list_clients(&auth).await?;
    Ok(Json(ApiResponse::ok(ClientListResponse { clients })))
}
