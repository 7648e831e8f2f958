//! Authentication error types
//!
//! The tree core never raises errors (dangling edges, unknown relation types
//! and cyclic data are absorbed structurally); only the boundary layers do.

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid credentials provided
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Session not found
    #[error("Session not found")]
    SessionNotFound,

    /// Session has expired
    #[error("Session expired")]
    SessionExpired,

    /// Invalid email format
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Password does not meet requirements
    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    /// Email already registered
    #[error("Email already registered")]
    UserAlreadyExists,

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// bcrypt failure
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}
