use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Request-level error taxonomy. Every store/hash/token failure is caught at
/// the handler boundary and mapped onto one of these; nothing propagates as a
/// panic. No variant is ever retried.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("User already exists.")]
    DuplicateUser,

    /// Login path reports an unknown handle as a 400, unlike the
    /// fetch/update paths which 404.
    #[error("User does not exist")]
    LoginUserNotFound,

    #[error("Incorrect password")]
    BadCredential,

    #[error("User does not exist")]
    UserNotFound,

    /// 404 for a bad role string is a quirk kept for wire compatibility.
    #[error("Role is invalid")]
    InvalidRole,

    #[error("No changes were made")]
    NoChanges,

    #[error("Access denied")]
    Forbidden,

    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateUser
            | ApiError::LoginUserNotFound
            | ApiError::BadCredential
            | ApiError::NoChanges => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound | ApiError::InvalidRole => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            // Log the cause, never leak it to the caller.
            error!(error = %e, "internal error");
        }
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}
