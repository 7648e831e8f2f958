use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

pub async fn root() -> &'static str {
    "GenLink API v1.0"
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> Result<Json<Value>, StatusCode> {
    Ok(Json(json!({
        "status": "healthy",
        "service": "genlink",
        "version": env!("CARGO_PKG_VERSION")
    })))
}
