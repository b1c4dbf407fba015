use serde::Serialize;

/// A model that callers can pick for a chat
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub context_window: u32,
}

const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "claude-3-opus-20240229",
        name: "Claude 3 Opus",
        description: "Most powerful model for highly complex tasks",
        context_window: 200_000,
    },
    ModelInfo {
        id: "claude-3-sonnet-20240229",
        name: "Claude 3 Sonnet",
        description: "Balanced model for most tasks",
        context_window: 200_000,
    },
    ModelInfo {
        id: "claude-3-haiku-20240307",
        name: "Claude 3 Haiku",
        description: "Fastest and most compact model",
        context_window: 200_000,
    },
    ModelInfo {
        id: "claude-3-5-sonnet-20240620",
        name: "Claude 3.5 Sonnet",
        description: "Latest Sonnet model with advanced reasoning",
        context_window: 200_000,
    },
];

pub fn available_models() -> &'static [ModelInfo] {
    MODELS
}
