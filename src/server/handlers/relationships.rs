use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiError;
use crate::database::entities::{
    persons, persons::Entity as Persons, relationships, relationships::Entity as Relationships,
};
use crate::server::app::AppState;
use crate::server::middleware::auth::AuthenticatedUser;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateRelationshipRequest {
    pub person_id: i32,
    pub related_person_id: i32,
    pub relation_type: String,
}

#[utoipa::path(
    get,
    path = "/api/relationships",
    responses(
        (status = 200, description = "The caller's relationships, newest first", body = [relationships::Model]),
        (status = 401, description = "Not authorized")
    )
)]
pub async fn list_relationships(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<relationships::Model>>, ApiError> {
    let relationships = Relationships::find()
        .filter(relationships::Column::UserId.eq(user.id))
        .order_by_desc(relationships::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(relationships))
}

#[utoipa::path(
    post,
    path = "/api/relationships",
    request_body = CreateRelationshipRequest,
    responses(
        (status = 201, description = "Relationship created", body = relationships::Model),
        (status = 400, description = "Missing fields or person IDs not owned by the caller"),
        (status = 401, description = "Not authorized")
    )
)]
pub async fn create_relationship(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateRelationshipRequest>,
) -> Result<(StatusCode, Json<relationships::Model>), ApiError> {
    if payload.relation_type.trim().is_empty() {
        return Err(ApiError::bad_request(
            "person_id, related_person_id, relation_type required",
        ));
    }

    // Both endpoints must be persons owned by the caller.
    for person_id in [payload.person_id, payload.related_person_id] {
        Persons::find_by_id(person_id)
            .filter(persons::Column::UserId.eq(user.id))
            .one(&state.db)
            .await?
            .ok_or_else(|| ApiError::bad_request("Invalid person IDs for this user"))?;
    }

    let relationship = relationships::ActiveModel {
        user_id: Set(user.id),
        person_id: Set(payload.person_id),
        related_person_id: Set(payload.related_person_id),
        relation_type: Set(payload.relation_type),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let relationship = relationship.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(relationship)))
}

#[utoipa::path(
    delete,
    path = "/api/relationships/{id}",
    params(
        ("id" = i32, Path, description = "Relationship ID")
    ),
    responses(
        (status = 200, description = "Relationship deleted"),
        (status = 404, description = "Relationship not found or not authorized")
    )
)]
pub async fn delete_relationship(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let relationship = Relationships::find_by_id(id)
        .filter(relationships::Column::UserId.eq(user.id))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Relationship not found or not authorized"))?;

    let person_name = person_display_name(&state, relationship.person_id).await?;
    let related_person_name = person_display_name(&state, relationship.related_person_id).await?;

    Relationships::delete_by_id(relationship.id)
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({
        "message": format!(
            "Successfully deleted {} relationship between {} and {}",
            relationship.relation_type, person_name, related_person_name
        ),
        "deleted_relationship": {
            "id": relationship.id,
            "relation_type": relationship.relation_type,
            "person_name": person_name,
            "related_person_name": related_person_name,
        },
    })))
}

async fn person_display_name(state: &AppState, id: i32) -> Result<String, ApiError> {
    Ok(Persons::find_by_id(id)
        .one(&state.db)
        .await?
        .map(|p| p.full_name)
        .unwrap_or_else(|| format!("person #{}", id)))
}
