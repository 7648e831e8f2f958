use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::database::entities::users;
use crate::server::app::AppState;
use crate::server::handlers::ApiError;
use crate::services::auth_service::AuthService;

/// Extractor for routes that require a logged-in user. Resolves the
/// `Authorization: Bearer <token>` header to its session's user.
pub struct AuthenticatedUser(pub users::Model);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid authorization header"))?;

        let user = AuthService::new(state.db.clone()).authenticate(token).await?;

        Ok(AuthenticatedUser(user))
    }
}
