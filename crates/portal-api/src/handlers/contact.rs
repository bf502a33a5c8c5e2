//! Contact form handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use portal_core::error::AppError;

use crate::error::ApiError;
use portal_service::contact::service::ContactRequest;

use crate::dto::request::ContactFormRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/contact — public, no auth.
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<ContactFormRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    state.contact_service.submit(ContactRequest {
        name: req.name,
        phone: req.phone,
        email: req.email,
        service_type: req.service_type,
        details: req.details,
    })?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::ok(MessageResponse {
            message: "Submission received".to_string(),
        })),
    ))
}
