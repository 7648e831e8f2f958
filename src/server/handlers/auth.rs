use axum::{extract::State, response::Json};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiError;
use crate::database::entities::{users, users::Entity as Users};
use crate::server::app::AppState;
use crate::server::middleware::auth::AuthenticatedUser;
use crate::services::auth_service::AuthService;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub profile_picture: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: i32,
    pub email: String,
    pub profile_picture: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub profile_picture: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created, session token returned", body = TokenResponse),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email & password required"));
    }

    AuthService::validate_email(&payload.email)?;

    let existing = Users::find()
        .filter(users::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = AuthService::hash_password(&payload.password)?;
    let user = users::ActiveModel::new(payload.email, password_hash, payload.profile_picture)
        .insert(&state.db)
        .await?;

    let session = AuthService::new(state.db.clone())
        .create_session(user.id)
        .await?;

    Ok(Json(TokenResponse {
        token: session.session_id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token returned", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = Users::find()
        .filter(users::Column::Email.eq(&payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let ok = AuthService::verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let session = AuthService::new(state.db.clone())
        .create_session(user.id)
        .await?;

    let user: users::ActiveModel = user.into();
    user.set_last_login().update(&state.db).await?;

    Ok(Json(TokenResponse {
        token: session.session_id,
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Not authorized")
    )
)]
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> Result<Json<MeResponse>, ApiError> {
    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        profile_picture: user.profile_picture,
    }))
}

#[utoipa::path(
    put,
    path = "/api/auth/update-profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Profile picture missing"),
        (status = 401, description = "Not authorized")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let profile_picture = match payload.profile_picture {
        Some(picture) if !picture.is_empty() => picture,
        _ => return Err(ApiError::bad_request("Profile picture is required")),
    };

    let mut user: users::ActiveModel = user.into();
    user.profile_picture = Set(Some(profile_picture));
    user.updated_at = Set(chrono::Utc::now());
    user.update(&state.db).await?;

    Ok(Json(
        serde_json::json!({ "message": "Profile updated successfully" }),
    ))
}
