use async_trait::async_trait;
use futures::stream;
use serde_json::{json, Value};
use std::sync::Arc;
use std::sync::Mutex;

use crate::errors::{ProviderError, ProviderResult};
use crate::models::completion::Completion;
use crate::models::request::MessagesRequest;
use crate::providers::base::{Provider, ProviderEventStream, SearchBackend};

/// A mock provider that returns pre-configured responses and records every request
#[derive(Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<ProviderResult<Completion>>>>,
    events: Arc<Mutex<Option<ProviderResult<Vec<ProviderResult<Value>>>>>>,
    requests: Arc<Mutex<Vec<MessagesRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Value>) -> Self {
        Self::with_results(responses.into_iter().map(|r| Ok(Completion::new(r))).collect())
    }

    pub fn with_results(responses: Vec<ProviderResult<Completion>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Default::default()
        }
    }

    /// Events handed out by the next call to `stream`
    pub fn with_stream(self, events: ProviderResult<Vec<ProviderResult<Value>>>) -> Self {
        *self.events.lock().unwrap() = Some(events);
        self
    }

    pub fn requests(&self) -> Vec<MessagesRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: &MessagesRequest) -> ProviderResult<Completion> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return an empty turn if no more pre-configured responses
            Ok(Completion::new(json!({
                "content": [],
                "stop_reason": "end_turn"
            })))
        } else {
            responses.remove(0)
        }
    }

    async fn stream(&self, request: &MessagesRequest) -> ProviderResult<ProviderEventStream> {
        self.requests.lock().unwrap().push(request.clone());
        let events = self.events.lock().unwrap().take().unwrap_or(Ok(Vec::new()))?;
        Ok(Box::pin(stream::iter(events)))
    }
}

/// A mock search backend answering every query with the same payload
#[derive(Clone)]
pub struct MockSearch {
    response: ProviderResult<Value>,
    queries: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockSearch {
    pub fn new(response: Value) -> Self {
        Self {
            response: Ok(response),
            queries: Arc::default(),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            response: Err(error),
            queries: Arc::default(),
        }
    }

    pub fn queries(&self) -> Vec<(String, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for MockSearch {
    async fn web_search(&self, query: &str, count: u32) -> ProviderResult<Value> {
        self.queries.lock().unwrap().push((query.to_string(), count));
        self.response.clone()
    }
}

/// A brave style payload with `count` numbered results
pub fn search_payload(count: usize) -> Value {
    let results: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "title": format!("Result {}", i),
                "url": format!("https://example.com/{}", i),
                "description": format!("Description {}", i),
                "age": "1 day ago"
            })
        })
        .collect();

    json!({
        "type": "search",
        "query": {"original": "test"},
        "web": {"type": "search", "results": results}
    })
}
