use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::database::entities::{user_sessions, users};
use crate::errors::AuthError;

/// Session lifetime for bearer tokens.
const SESSION_TTL_DAYS: i64 = 7;

/// Service for handling authentication operations
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        if password.is_empty() {
            return Err(AuthError::InvalidPassword(
                "Password cannot be empty".to_string(),
            ));
        }

        if password.len() < 8 {
            return Err(AuthError::InvalidPassword(
                "Password must be at least 8 characters long".to_string(),
            ));
        }

        Ok(hash(password, DEFAULT_COST)?)
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(verify(password, hash)?)
    }

    /// Generate an opaque session token
    pub fn generate_session_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Calculate session expiration time
    pub fn calculate_session_expiry() -> chrono::DateTime<Utc> {
        Utc::now() + Duration::days(SESSION_TTL_DAYS)
    }

    /// Check if session is expired
    pub fn is_session_expired(expires_at: chrono::DateTime<Utc>) -> bool {
        Utc::now() > expires_at
    }

    /// Validate email format
    pub fn validate_email(email: &str) -> Result<(), AuthError> {
        if email.is_empty() {
            return Err(AuthError::InvalidEmail("Email cannot be empty".to_string()));
        }

        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 {
            return Err(AuthError::InvalidEmail(
                "must contain exactly one @".to_string(),
            ));
        }

        let local_part = parts[0];
        let domain_part = parts[1];

        if local_part.is_empty() {
            return Err(AuthError::InvalidEmail(
                "local part cannot be empty".to_string(),
            ));
        }

        if domain_part.is_empty() {
            return Err(AuthError::InvalidEmail(
                "domain part cannot be empty".to_string(),
            ));
        }

        if !domain_part.contains('.') {
            return Err(AuthError::InvalidEmail(
                "domain must contain a dot".to_string(),
            ));
        }

        if domain_part.starts_with('.') || domain_part.ends_with('.') {
            return Err(AuthError::InvalidEmail(
                "domain cannot start or end with a dot".to_string(),
            ));
        }

        if email.len() > 254 {
            return Err(AuthError::InvalidEmail("email is too long".to_string()));
        }

        Ok(())
    }

    /// Create a new session row for a user and return it.
    pub async fn create_session(&self, user_id: i32) -> Result<user_sessions::Model, AuthError> {
        let session = user_sessions::ActiveModel {
            session_id: Set(Self::generate_session_id()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            expires_at: Set(Self::calculate_session_expiry()),
            ..Default::default()
        };

        Ok(session.insert(&self.db).await?)
    }

    /// Resolve a bearer token to its user, rejecting unknown and expired
    /// sessions.
    pub async fn authenticate(&self, token: &str) -> Result<users::Model, AuthError> {
        let session = user_sessions::Entity::find()
            .filter(user_sessions::Column::SessionId.eq(token))
            .one(&self.db)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if Self::is_session_expired(session.expires_at) {
            return Err(AuthError::SessionExpired);
        }

        users::Entity::find_by_id(session.user_id)
            .one(&self.db)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = AuthService::hash_password("correct horse battery").unwrap();
        assert!(AuthService::verify_password("correct horse battery", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(AuthService::hash_password("").is_err());
        assert!(AuthService::hash_password("short").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(AuthService::validate_email("user@example.com").is_ok());

        assert!(AuthService::validate_email("").is_err());
        assert!(AuthService::validate_email("no-at-sign").is_err());
        assert!(AuthService::validate_email("two@@example.com").is_err());
        assert!(AuthService::validate_email("@example.com").is_err());
        assert!(AuthService::validate_email("user@").is_err());
        assert!(AuthService::validate_email("user@nodot").is_err());
        assert!(AuthService::validate_email("user@.example.com").is_err());
    }

    #[test]
    fn test_session_expiry_window() {
        let expiry = AuthService::calculate_session_expiry();
        assert!(!AuthService::is_session_expired(expiry));
        assert!(AuthService::is_session_expired(
            Utc::now() - Duration::seconds(1)
        ));
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(
            AuthService::generate_session_id(),
            AuthService::generate_session_id()
        );
    }
}
