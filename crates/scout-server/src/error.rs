use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scout::errors::GatewayError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Environment variable that sets a dotted settings path, e.g. `anthropic.api_key`
pub fn to_env_var(field_path: &str) -> String {
    format!("SCOUT_{}", field_path.replace('.', "__").to_uppercase())
}

/// Error returned by the route handlers, rendered as a JSON body
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(GatewayError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %err, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %err, "request rejected");
        }

        let body = match err {
            GatewayError::Validation(message) => json!({ "error": message }),
            GatewayError::ProviderApi {
                name,
                message,
                request_id,
                ..
            } => json!({
                "error": name,
                "message": message,
                "request_id": request_id,
            }),
            GatewayError::Connection(details) => json!({
                "error": "ConnectionError",
                "message": "Could not reach the upstream service",
                "details": details,
            }),
            GatewayError::Timeout(details) => json!({
                "error": "TimeoutError",
                "message": "The upstream service did not respond in time",
                "details": details,
            }),
            GatewayError::Internal(details) => json!({
                "error": "InternalServerError",
                "message": "Internal server error",
                "details": details,
            }),
            other => json!({
                "error": "InternalServerError",
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
