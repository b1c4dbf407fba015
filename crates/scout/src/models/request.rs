use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Message;
use super::tool::Tool;

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const ANALYSIS_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const ANALYSIS_MAX_TOKENS: u32 = 300;

/// Generation parameters supplied by a caller of the chat routes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Option<Vec<Message>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub system: Option<Value>,
    #[serde(default)]
    pub tools: Option<Vec<Tool>>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: Some(messages),
            ..Default::default()
        }
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_system<S: Into<String>>(mut self, system: S) -> Self {
        self.system = Some(Value::String(system.into()));
        self
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// The request body posted to the messages endpoint of the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stream: bool,
}

impl MessagesRequest {
    pub fn new<S: Into<String>>(model: S, max_tokens: u32, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages,
            temperature: None,
            system: None,
            tools: Vec::new(),
            stream: false,
        }
    }

    /// Copy of this request flagged for a streamed response
    pub fn streaming(&self) -> Self {
        Self {
            stream: true,
            ..self.clone()
        }
    }
}

/// Body of the direct search route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Kept loose so a non-string query is reported as invalid rather than unparseable
    #[serde(default)]
    pub query: Option<Value>,
    #[serde(default)]
    pub num_results: Option<u32>,
}

impl SearchRequest {
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: Some(Value::String(query.into())),
            num_results: None,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_ref().and_then(Value::as_str)
    }
}

/// Body of the search-then-summarize route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub query: Option<Value>,
    #[serde(default)]
    pub num_results: Option<u32>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl AnalyzeRequest {
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: Some(Value::String(query.into())),
            ..Default::default()
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_ref().and_then(Value::as_str)
    }
}

/// Drop system prompts that carry nothing, the same way an absent one is treated
pub(crate) fn non_empty_system(system: Option<Value>) -> Option<Value> {
    match system {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Array(a)) if a.is_empty() => None,
        other => other,
    }
}
