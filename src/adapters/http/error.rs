//! Error responses shared by every endpoint.
//!
//! Domain errors become `{ "code", "message", "details"? }` with a status
//! derived from the `ErrorCode`. Infrastructure failures are logged and
//! answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal() -> Self {
        Self {
            code: ErrorCode::InternalError.to_string(),
            message: "Internal server error".to_string(),
            details: None,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(error: &DomainError) -> Self {
        let details = (!error.details.is_empty()).then(|| {
            serde_json::Value::Object(
                error
                    .details
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            )
        });
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            details,
        }
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::ProfileNotFound
        | ErrorCode::PlanNotFound
        | ErrorCode::BlockNotFound
        | ErrorCode::NudgeNotFound
        | ErrorCode::ConnectionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ProfileAlreadyExists => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::CalendarProviderError | ErrorCode::AIProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::EncryptionError | ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Maps a domain error to its HTTP response.
pub fn domain_error_response(error: DomainError) -> Response {
    let status = status_for(error.code);
    if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
        tracing::error!(code = %error.code, error = %error.message, "request failed");
        return (status, Json(ErrorResponse::internal())).into_response();
    }
    if status == StatusCode::BAD_GATEWAY {
        tracing::warn!(code = %error.code, error = %error.message, "upstream provider failed");
    }
    (status, Json(ErrorResponse::from(&error))).into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}
