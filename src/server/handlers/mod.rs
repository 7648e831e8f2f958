pub mod auth;
pub mod health;
pub mod persons;
pub mod relationships;
pub mod tree;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use tracing::error;

use crate::errors::AuthError;

/// Boundary error: an HTTP status plus a `{"message": ...}` body. The tree
/// core never produces these; only persistence and auth do.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        error!("Database error: {}", err);
        Self::internal("Server error")
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::unauthorized("Invalid credentials"),
            AuthError::SessionNotFound | AuthError::SessionExpired | AuthError::UserNotFound => {
                Self::unauthorized("Not authorized")
            }
            AuthError::InvalidEmail(_) | AuthError::InvalidPassword(_) => {
                Self::bad_request(err.to_string())
            }
            AuthError::UserAlreadyExists => Self::conflict("Email already registered"),
            AuthError::Database(db_err) => db_err.into(),
            AuthError::Hashing(hash_err) => {
                error!("bcrypt error: {}", hash_err);
                Self::internal("Server error")
            }
        }
    }
}
