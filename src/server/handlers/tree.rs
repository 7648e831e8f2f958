use axum::{
    extract::{Path, State},
    response::Json,
};

use super::ApiError;
use crate::server::app::AppState;
use crate::server::middleware::auth::AuthenticatedUser;
use crate::services::family_service::FamilyService;
use crate::tree::FamilyLevel;

#[utoipa::path(
    get,
    path = "/api/tree/{root_id}",
    params(
        ("root_id" = i32, Path, description = "Person to root the rendered tree at")
    ),
    responses(
        (status = 200, description = "Rendered family tree for the root person"),
        (status = 401, description = "Not authorized"),
        (status = 404, description = "Root person not found")
    )
)]
pub async fn render_tree(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(root_id): Path<i32>,
) -> Result<Json<FamilyLevel>, ApiError> {
    let graph = FamilyService::new(state.db.clone())
        .load_graph(user.id)
        .await?;

    // A missing root means nothing to display; at the HTTP boundary that is
    // a plain 404.
    let tree = graph
        .render(root_id)
        .ok_or_else(|| ApiError::not_found("Person not found"))?;

    Ok(Json(tree))
}
