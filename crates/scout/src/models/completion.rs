use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::ContentBlock;
use super::message::Message;
use super::tool::ToolCall;

pub const TOOL_USE_STOP_REASON: &str = "tool_use";

/// A response from the messages endpoint, kept as the provider sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Completion(Value);

impl Completion {
    pub fn new(body: Value) -> Self {
        Completion(body)
    }

    pub fn body(&self) -> &Value {
        &self.0
    }

    pub fn into_body(self) -> Value {
        self.0
    }

    pub fn stop_reason(&self) -> Option<&str> {
        self.0.get("stop_reason").and_then(Value::as_str)
    }

    /// Whether the model stopped because it wants a tool executed
    pub fn is_tool_use(&self) -> bool {
        self.stop_reason() == Some(TOOL_USE_STOP_REASON)
    }

    /// The content blocks, in the order the provider returned them
    pub fn content(&self) -> Vec<ContentBlock> {
        self.0
            .get("content")
            .and_then(Value::as_array)
            .map(|blocks| blocks.iter().cloned().map(ContentBlock::from_value).collect())
            .unwrap_or_default()
    }

    /// The first tool invocation in the content, if any
    pub fn first_tool_call(&self) -> Option<ToolCall> {
        self.content().iter().find_map(|block| {
            block
                .as_tool_use()
                .map(|(id, name, input)| ToolCall::new(id, name, input.clone()))
        })
    }

    /// An assistant turn echoing this response's content exactly
    pub fn to_assistant_message(&self) -> Message {
        Message::assistant(self.content())
    }
}
