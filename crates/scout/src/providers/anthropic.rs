use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::base::{Provider, ProviderEventStream};
use super::configs::AnthropicProviderConfig;
use super::utils::{error_from_response, message_event_stream};
use crate::errors::ProviderResult;
use crate::models::completion::Completion;
use crate::models::request::MessagesRequest;

pub struct AnthropicProvider {
    client: Client,
    config: AnthropicProviderConfig,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, request: &MessagesRequest) -> ProviderResult<reqwest::Response> {
        let url = format!("{}/v1/messages", self.config.host.trim_end_matches('/'));

        tracing::debug!(
            model = %request.model,
            stream = request.stream,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "posting to messages endpoint"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.version)
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn complete(&self, request: &MessagesRequest) -> ProviderResult<Completion> {
        let response = if request.stream {
            let mut request = request.clone();
            request.stream = false;
            self.post(&request).await?
        } else {
            self.post(request).await?
        };

        Ok(Completion::new(response.json().await?))
    }

    async fn stream(&self, request: &MessagesRequest) -> ProviderResult<ProviderEventStream> {
        let response = self.post(&request.streaming()).await?;
        Ok(message_event_stream(response.bytes_stream()))
    }
}
