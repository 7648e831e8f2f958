use anyhow::Result;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{auth, health, persons, relationships, tree};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        auth::me,
        auth::update_profile,
        persons::list_persons,
        persons::create_person,
        persons::delete_person,
        relationships::list_relationships,
        relationships::create_relationship,
        relationships::delete_relationship,
        tree::render_tree,
    ),
    components(schemas(
        auth::SignupRequest,
        auth::LoginRequest,
        auth::TokenResponse,
        auth::MeResponse,
        auth::UpdateProfileRequest,
        persons::CreatePersonRequest,
        relationships::CreateRelationshipRequest,
        crate::database::entities::persons::Model,
        crate::database::entities::relationships::Model,
    )),
    info(
        title = "GenLink API",
        description = "Family relationship tracker: persons, typed relationships, rendered family trees"
    )
)]
struct ApiDoc;

pub fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState { db };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes())
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth routes
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/update-profile", put(auth::update_profile))
        // Person routes
        .route("/persons", get(persons::list_persons))
        .route("/persons", post(persons::create_person))
        .route("/persons/:id", delete(persons::delete_person))
        // Relationship routes
        .route("/relationships", get(relationships::list_relationships))
        .route("/relationships", post(relationships::create_relationship))
        .route("/relationships/:id", delete(relationships::delete_relationship))
        // Rendered family tree
        .route("/tree/:root_id", get(tree::render_tree))
}
