use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::UserError;

#[derive(Debug)]
pub enum ApiError {
    /// Missing field or unreadable body. `detail` holds parser output, if any.
    ValidationError {
        message: String,
        detail: Option<String>,
    },

    NotFound(String),

    Conflict(String),

    /// `message` is a stable summary; `detail` is the driver's own text and
    /// is returned to the client in the `error` field.
    InternalError { message: String, detail: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError { message, .. } => write!(f, "Validation error: {}", message),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError { message, detail } => {
                write!(f, "Internal error: {}: {}", message, detail)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError {
            message: msg.into(),
            detail: None,
        }
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound("User not found".to_string())
    }

    pub fn email_conflict() -> Self {
        ApiError::Conflict("Email already exists".to_string())
    }

    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::InternalError {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::ValidationError { message, detail } => {
                ApiResponse::<()>::error(message, detail)
            }
            ApiError::NotFound(message) | ApiError::Conflict(message) => {
                ApiResponse::<()>::error(message, None)
            }
            ApiError::InternalError { message, detail } => {
                tracing::error!("{}: {}", message, detail);
                ApiResponse::<()>::error(message, Some(detail))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::user_not_found(),
            UserError::Conflict(detail) => {
                tracing::warn!("Rejected duplicate email: {}", detail);
                Self::email_conflict()
            }
            UserError::Database { summary, detail } => Self::internal(summary, detail),
        }
    }
}
