use axum::{routing::get, Json, Router};
use scout::models::catalog::{available_models, ModelInfo};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ModelsResponse {
    models: &'static [ModelInfo],
}

// The catalog is static, no upstream call is made
async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: available_models(),
    })
}

pub fn routes() -> Router {
    Router::new().route("/models", get(list_models))
}
