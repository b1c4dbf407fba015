use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::errors::ProviderResult;
use crate::models::completion::Completion;
use crate::models::request::MessagesRequest;

/// Events of a streamed completion, decoded from the provider's event stream
pub type ProviderEventStream = BoxStream<'static, ProviderResult<Value>>;

/// Base trait for LLM providers
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate the next message for the conversation in `request`
    async fn complete(&self, request: &MessagesRequest) -> ProviderResult<Completion>;

    /// Open a streamed completion; events are yielded as the provider emits them
    async fn stream(&self, request: &MessagesRequest) -> ProviderResult<ProviderEventStream>;
}

/// Base trait for web search providers
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a web search, returning the provider's payload untouched
    async fn web_search(&self, query: &str, count: u32) -> ProviderResult<Value>;
}
