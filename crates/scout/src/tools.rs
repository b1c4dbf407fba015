use serde_json::json;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::models::tool::Tool;

/// Tools the gateway knows how to execute on the model's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum BuiltinTool {
    #[strum(serialize = "brave_search")]
    WebSearch,
}

impl BuiltinTool {
    /// Look up a built-in tool by the name the model used
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// The declaration sent to the model for this tool
    pub fn declaration(&self) -> Tool {
        match self {
            BuiltinTool::WebSearch => Tool::new(
                self.name(),
                "Search the web using Brave Search",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Search terms"
                        },
                        "num_results": {
                            "type": "number",
                            "description": "Number of results to return (1-10)",
                            "minimum": 1,
                            "maximum": 10
                        }
                    },
                    "required": ["query"]
                }),
            ),
        }
    }

    /// Whether `name` collides with any built-in tool
    pub fn is_reserved(name: &str) -> bool {
        BuiltinTool::iter().any(|tool| tool.name() == name)
    }
}
