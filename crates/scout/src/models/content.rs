use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A block of content inside a turn, as exchanged with the provider
///
/// Blocks the gateway does not act on are carried as `Other` and written back
/// exactly as they were received.
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
    #[serde(untagged)]
    Other(Value),
}

impl ContentBlock {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn tool_use<S: Into<String>, N: Into<String>>(id: S, name: N, input: Value) -> Self {
        ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    pub fn tool_result<S: Into<String>, C: Into<String>>(tool_use_id: S, content: C) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: None,
        }
    }

    /// Interpret a raw JSON block. A typed variant is only used when writing it back
    /// reproduces `value` exactly; anything else stays opaque.
    pub fn from_value(value: Value) -> Self {
        let typed = match value.get("type").and_then(Value::as_str) {
            Some("text") => value
                .get("text")
                .and_then(Value::as_str)
                .map(ContentBlock::text),
            Some("tool_use") => match (
                value.get("id").and_then(Value::as_str),
                value.get("name").and_then(Value::as_str),
                value.get("input"),
            ) {
                (Some(id), Some(name), Some(input)) => {
                    Some(ContentBlock::tool_use(id, name, input.clone()))
                }
                _ => None,
            },
            Some("tool_result") => match (
                value.get("tool_use_id").and_then(Value::as_str),
                value.get("content").and_then(Value::as_str),
            ) {
                (Some(id), Some(content)) => Some(ContentBlock::ToolResult {
                    tool_use_id: id.to_string(),
                    content: content.to_string(),
                    is_error: value.get("is_error").and_then(Value::as_bool),
                }),
                _ => None,
            },
            _ => None,
        };

        match typed {
            Some(block) if block.to_value() == value => block,
            _ => ContentBlock::Other(value),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Get the text if this is a text block
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Get (id, name, input) if this is a tool invocation
    pub fn as_tool_use(&self) -> Option<(&str, &str, &Value)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }

    /// Get (tool_use_id, content) if this is a tool result
    pub fn as_tool_result(&self) -> Option<(&str, &str)> {
        match self {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => Some((tool_use_id, content)),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(ContentBlock::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_blocks_are_typed() {
        let block = ContentBlock::from_value(json!({"type": "text", "text": "hi"}));
        assert_eq!(block.as_text(), Some("hi"));

        let block = ContentBlock::from_value(json!({
            "type": "tool_use",
            "id": "toolu_1",
            "name": "brave_search",
            "input": {"query": "rust"}
        }));
        let (id, name, input) = block.as_tool_use().unwrap();
        assert_eq!(id, "toolu_1");
        assert_eq!(name, "brave_search");
        assert_eq!(input, &json!({"query": "rust"}));
    }

    #[test]
    fn test_extra_fields_stay_opaque() {
        let raw = json!({
            "type": "text",
            "text": "cited",
            "citations": [{"url": "https://example.com"}]
        });
        let block = ContentBlock::from_value(raw.clone());
        assert!(matches!(block, ContentBlock::Other(_)));
        assert_eq!(block.to_value(), raw);
    }

    #[test]
    fn test_unknown_block_round_trips() {
        let raw = json!({"type": "thinking", "thinking": "hmm", "signature": "abc"});
        let block: ContentBlock = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&block).unwrap(), raw);
    }

    #[test]
    fn test_tool_result_serialization() {
        let block = ContentBlock::tool_result("toolu_1", "{}");
        assert_eq!(
            block.to_value(),
            json!({"type": "tool_result", "tool_use_id": "toolu_1", "content": "{}"})
        );
        assert_eq!(block.as_tool_result(), Some(("toolu_1", "{}")));
    }
}
