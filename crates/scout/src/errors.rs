use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults raised while talking to an upstream HTTP provider (model or search)
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ProviderError {
    /// The provider answered with a non-success status
    #[error("{status} {message}")]
    Api {
        status: u16,
        name: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Build an API error, naming it the way the provider SDKs name status classes
    pub fn api(status: u16, message: impl Into<String>, request_id: Option<String>) -> Self {
        ProviderError::Api {
            status,
            name: api_error_name(status).to_string(),
            message: message.into(),
            request_id,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ProviderError::Connection(err.to_string())
        } else if err.is_decode() || err.is_body() {
            ProviderError::Stream(err.to_string())
        } else {
            ProviderError::Internal(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Internal(format!("Invalid JSON from provider: {}", err))
    }
}

fn api_error_name(status: u16) -> &'static str {
    match status {
        400 => "BadRequestError",
        401 => "AuthenticationError",
        403 => "PermissionDeniedError",
        404 => "NotFoundError",
        409 => "ConflictError",
        422 => "UnprocessableEntityError",
        429 => "RateLimitError",
        s if s >= 500 => "InternalServerError",
        _ => "APIError",
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Caller-facing error taxonomy of the gateway
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),

    #[error("{name}: {message}")]
    ProviderApi {
        status: u16,
        name: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation(_) => 400,
            GatewayError::ProviderApi { status, .. } => *status,
            GatewayError::Connection(_) => 503,
            GatewayError::Timeout(_) => 504,
            GatewayError::Internal(_) => 500,
        }
    }
}

impl From<ProviderError> for GatewayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api {
                status,
                name,
                message,
                request_id,
            } => GatewayError::ProviderApi {
                status,
                name,
                message,
                request_id,
            },
            ProviderError::Connection(msg) => GatewayError::Connection(msg),
            ProviderError::Timeout(msg) => GatewayError::Timeout(msg),
            other => GatewayError::Internal(other.to_string()),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_names_follow_status() {
        let names: Vec<String> = [400, 401, 403, 404, 409, 422, 429, 500, 529, 418]
            .into_iter()
            .map(|status| match ProviderError::api(status, "x", None) {
                ProviderError::Api { name, .. } => name,
                _ => unreachable!(),
            })
            .collect();

        assert_eq!(
            names,
            vec![
                "BadRequestError",
                "AuthenticationError",
                "PermissionDeniedError",
                "NotFoundError",
                "ConflictError",
                "UnprocessableEntityError",
                "RateLimitError",
                "InternalServerError",
                "InternalServerError",
                "APIError",
            ]
        );
    }

    #[test]
    fn test_provider_errors_classify() {
        let api: GatewayError =
            ProviderError::api(429, "slow down", Some("req_1".to_string())).into();
        assert_eq!(api.status_code(), 429);
        assert!(matches!(
            api,
            GatewayError::ProviderApi { ref name, ref request_id, .. }
                if name == "RateLimitError" && request_id.as_deref() == Some("req_1")
        ));

        let conn: GatewayError = ProviderError::Connection("refused".into()).into();
        assert_eq!(conn.status_code(), 503);

        let timeout: GatewayError = ProviderError::Timeout("slow".into()).into();
        assert_eq!(timeout.status_code(), 504);

        let stream: GatewayError = ProviderError::Stream("cut".into()).into();
        assert_eq!(stream.status_code(), 500);
        assert!(matches!(stream, GatewayError::Internal(_)));
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = GatewayError::validation("Invalid messages");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Invalid messages");
    }
}
