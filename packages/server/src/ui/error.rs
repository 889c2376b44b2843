//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{domain::RoomError, infrastructure::dto::http::ErrorResponse, usecase::UseCaseError};

/// UseCase error rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(UseCaseError);

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            UseCaseError::Validation(_) => StatusCode::BAD_REQUEST,
            UseCaseError::RoomNotFound(_) | UseCaseError::ResultNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            UseCaseError::StateConflict(RoomError::NotParticipant(_) | RoomError::NotOwner(_)) => {
                StatusCode::FORBIDDEN
            }
            UseCaseError::StateConflict(_) | UseCaseError::UsernameTaken(_) => {
                StatusCode::CONFLICT
            }
            UseCaseError::StoreUnavailable(reason) => {
                tracing::error!("Store unavailable: {}", reason);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
