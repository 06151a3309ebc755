use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::application::error::ServiceError;

/// Boundary between the use-case error taxonomy and HTTP. Every failure leaves
/// as `{ "error": <stable kind>, "message": <human text> }`.
pub enum ApiError {
    Service(ServiceError),
    Status(StatusCode),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError::Service(e)
    }
}

impl From<StatusCode> for ApiError {
    fn from(s: StatusCode) -> Self {
        ApiError::Status(s)
    }
}

fn status_for(e: &ServiceError) -> StatusCode {
    match e {
        ServiceError::NotFound | ServiceError::UserNotFound => StatusCode::NOT_FOUND,
        ServiceError::Forbidden | ServiceError::LinkFull => StatusCode::FORBIDDEN,
        ServiceError::InvalidArgument(_) | ServiceError::AlreadyCollaborator => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::EmailTaken => StatusCode::CONFLICT,
        ServiceError::LinkExpired => StatusCode::GONE,
        ServiceError::RevisionWriteFailed(_) | ServiceError::Transient(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Service(e) => {
                let status = status_for(&e);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!(error = ?e, "request_failed");
                }
                let body = json!({ "error": e.kind(), "message": e.to_string() });
                (status, Json(body)).into_response()
            }
            ApiError::Status(status) => status.into_response(),
        }
    }
}
