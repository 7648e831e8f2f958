use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiError;
use crate::database::entities::{
    persons, persons::Entity as Persons, relationships, relationships::Entity as Relationships,
};
use crate::server::app::AppState;
use crate::server::middleware::auth::AuthenticatedUser;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    pub full_name: String,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub notes: Option<String>,
    pub profile_picture: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/persons",
    responses(
        (status = 200, description = "The caller's persons, newest first", body = [persons::Model]),
        (status = 401, description = "Not authorized")
    )
)]
pub async fn list_persons(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<persons::Model>>, ApiError> {
    let persons = Persons::find()
        .filter(persons::Column::UserId.eq(user.id))
        .order_by_desc(persons::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(persons))
}

#[utoipa::path(
    post,
    path = "/api/persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = persons::Model),
        (status = 400, description = "full_name is required"),
        (status = 401, description = "Not authorized")
    )
)]
pub async fn create_person(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<persons::Model>), ApiError> {
    if payload.full_name.trim().is_empty() {
        return Err(ApiError::bad_request("full_name is required"));
    }

    let person = persons::ActiveModel {
        user_id: Set(user.id),
        full_name: Set(payload.full_name),
        gender: Set(payload.gender.unwrap_or_else(|| "other".to_string())),
        birthdate: Set(payload.birthdate),
        notes: Set(payload.notes),
        profile_picture: Set(payload.profile_picture),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let person = person.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    delete,
    path = "/api/persons/{id}",
    params(
        ("id" = i32, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person deleted along with its relationships"),
        (status = 404, description = "Person not found or not authorized")
    )
)]
pub async fn delete_person(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let person = Persons::find_by_id(id)
        .filter(persons::Column::UserId.eq(user.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Person not found or not authorized"))?;

    // Schema-level cascade only fires when the SQLite connection enforces
    // foreign keys, so relationships are removed explicitly as well.
    let removed = Relationships::delete_many()
        .filter(relationships::Column::UserId.eq(user.id))
        .filter(
            Condition::any()
                .add(relationships::Column::PersonId.eq(person.id))
                .add(relationships::Column::RelatedPersonId.eq(person.id)),
        )
        .exec(&state.db)
        .await?;

    Persons::delete_by_id(person.id).exec(&state.db).await?;

    Ok(Json(serde_json::json!({
        "message": format!("Successfully deleted person with ID {}", person.id),
        "deleted_relationships": removed.rows_affected,
    })))
}
