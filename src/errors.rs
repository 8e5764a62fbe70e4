use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Display renders the client-facing message; the response body is built
/// from it so the two can never drift apart.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Username is not registered. Check the username again.")]
    UserNotFound,

    #[error("Invalid password!")]
    InvalidCredentials,

    #[error("Refresh token is required!")]
    MissingRefreshToken,

    #[error("Refresh token is not in database!")]
    RefreshTokenNotFound,

    #[error("Refresh token has expired. Please make a new signin request")]
    RefreshTokenExpired,

    #[error("No token provided!")]
    NoToken,

    #[error("Access token has expired!")]
    TokenExpired,

    #[error("Invalid access token!")]
    InvalidToken,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Db(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_)
            | AppError::UserNotFound
            | AppError::RefreshTokenNotFound
            | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::MissingRefreshToken
            | AppError::NoToken
            | AppError::TokenExpired
            | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::RefreshTokenExpired => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Db(detail) | AppError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // 500s keep the detail server-side and return a generic body.
        let msg = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal error. Please check application log.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": msg }))).into_response()
    }
}
