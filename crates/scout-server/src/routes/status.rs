use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatusResponse {
    message: &'static str,
    version: &'static str,
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Scout gateway is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn routes() -> Router {
    Router::new().route("/", get(status))
}
