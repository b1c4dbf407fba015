use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::errors::{GatewayError, GatewayResult};
use crate::providers::base::SearchBackend;

/// Results requested when the model calls the search tool without a count
pub const TOOL_DEFAULT_COUNT: u32 = 3;
/// Results requested by the direct search routes without a count
pub const DIRECT_DEFAULT_COUNT: u32 = 5;
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 10;

const SEARCH_FAILED: &str = "Search request failed";

/// One ranked web result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}

impl SearchResult {
    /// Read one provider result; fields that are absent or not text come out empty
    fn from_item(item: &Value) -> Self {
        let field = |name: &str| {
            item.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            title: field("title"),
            url: field("url"),
            description: field("description"),
        }
    }
}

/// The normalized output of a search, in provider ranking order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub results: Vec<SearchResult>,
    pub query: String,
    pub total_results: usize,
}

impl SearchResultSet {
    /// Narrow a raw web search payload down to its ranked web results
    pub fn from_payload(query: &str, payload: &Value) -> Self {
        let results: Vec<SearchResult> = payload
            .pointer("/web/results")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(SearchResult::from_item).collect())
            .unwrap_or_default();

        Self {
            total_results: results.len(),
            results,
            query: query.to_string(),
        }
    }
}

/// A failed search, reported as data instead of being raised
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{error}: {message}")]
pub struct SearchFault {
    pub error: String,
    pub message: String,
}

impl SearchFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: SEARCH_FAILED.to_string(),
            message: message.into(),
        }
    }
}

/// Arguments the model passes to the search tool
#[derive(Debug, Clone, Deserialize)]
struct SearchToolInput {
    query: String,
    #[serde(default)]
    num_results: Option<f64>,
}

/// Executes web searches against an injected backend
#[derive(Clone)]
pub struct SearchInvoker {
    backend: Arc<dyn SearchBackend>,
}

impl SearchInvoker {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Search for the direct endpoints: validates the query and relays the raw payload
    pub async fn raw(&self, query: Option<&str>, count: Option<u32>) -> GatewayResult<Value> {
        let query = validate_query(query)?;
        let count = count.unwrap_or(DIRECT_DEFAULT_COUNT);
        Ok(self.backend.web_search(query, count).await?)
    }

    /// Search and normalize the results; provider faults come back as a `SearchFault`
    pub async fn search(&self, query: &str, count: u32) -> Result<SearchResultSet, SearchFault> {
        match self.backend.web_search(query, count).await {
            Ok(payload) => Ok(SearchResultSet::from_payload(query, &payload)),
            Err(e) => {
                tracing::error!(query, error = %e, "web search failed");
                Err(SearchFault::new(e.to_string()))
            }
        }
    }

    /// Execute the search tool with the model supplied input. Never fails: the output is
    /// either the result set or the fault, both ready to embed as a tool result.
    pub async fn run_tool(&self, input: &Value) -> Value {
        let outcome = match serde_json::from_value::<SearchToolInput>(input.clone()) {
            Ok(input) => {
                let count = input
                    .num_results
                    .map(clamp_count)
                    .unwrap_or(TOOL_DEFAULT_COUNT);
                self.search(&input.query, count).await
            }
            Err(e) => Err(SearchFault::new(format!("Invalid tool input: {}", e))),
        };

        let serialized = match &outcome {
            Ok(results) => serde_json::to_value(results),
            Err(fault) => serde_json::to_value(fault),
        };
        serialized.unwrap_or_else(|e| serde_json::json!({"error": SEARCH_FAILED, "message": e.to_string()}))
    }
}

pub(crate) fn validate_query(query: Option<&str>) -> GatewayResult<&str> {
    match query {
        Some(query) if !query.is_empty() => Ok(query),
        _ => Err(GatewayError::validation("Invalid query")),
    }
}

fn clamp_count(count: f64) -> u32 {
    if count.is_nan() {
        return TOOL_DEFAULT_COUNT;
    }
    (count.round() as i64).clamp(MIN_COUNT as i64, MAX_COUNT as i64) as u32
}
