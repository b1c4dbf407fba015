use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::base::SearchBackend;
use super::configs::BraveSearchConfig;
use super::utils::error_from_response;
use crate::errors::{ProviderError, ProviderResult};

const WEB_SEARCH_PATH: &str = "/res/v1/web/search";

/// Client for the Brave web search API
pub struct BraveSearch {
    client: Client,
    config: BraveSearchConfig,
    endpoint: Url,
}

impl BraveSearch {
    pub fn new(config: BraveSearchConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .gzip(true)
            .build()?;

        let endpoint = Url::parse(&config.host)
            .and_then(|host| host.join(WEB_SEARCH_PATH))
            .map_err(|e| {
                ProviderError::Internal(format!("Invalid search host {}: {}", config.host, e))
            })?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }
}

#[async_trait]
impl SearchBackend for BraveSearch {
    async fn web_search(&self, query: &str, count: u32) -> ProviderResult<Value> {
        tracing::debug!(query, count, "querying brave web search");

        let count = count.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query), ("count", count.as_str())])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.config.api_key)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> BraveSearch {
        BraveSearch::new(BraveSearchConfig::new("brave_key").with_host(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_web_search_returns_raw_payload() -> anyhow::Result<()> {
        let payload = json!({
            "type": "search",
            "query": {"original": "rust"},
            "web": {"results": [{"title": "Rust", "url": "https://rust-lang.org", "description": "A language"}]}
        });

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .and(query_param("q", "rust"))
            .and(query_param("count", "5"))
            .and(header("X-Subscription-Token", "brave_key"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = backend_for(&mock_server).web_search("rust", 5).await?;
        assert_eq!(result, payload);
        Ok(())
    }

    #[tokio::test]
    async fn test_web_search_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/res/v1/web/search"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "ErrorResponse",
                "error": {"code": "SUBSCRIPTION_TOKEN_INVALID", "detail": "bad token", "status": 401}
            })))
            .mount(&mock_server)
            .await;

        let err = backend_for(&mock_server)
            .web_search("rust", 5)
            .await
            .unwrap_err();
        assert!(
            matches!(err, ProviderError::Api { status: 401, ref name, .. } if name == "AuthenticationError")
        );
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let result = BraveSearch::new(BraveSearchConfig::new("k").with_host("not a url"));
        assert!(matches!(result, Err(ProviderError::Internal(_))));
    }
}
