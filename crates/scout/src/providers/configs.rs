pub const ANTHROPIC_HOST: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const BRAVE_HOST: &str = "https://api.search.brave.com";

#[derive(Debug, Clone, PartialEq)]
pub struct AnthropicProviderConfig {
    pub host: String,
    pub api_key: String,
    pub version: String,
}

impl AnthropicProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: ANTHROPIC_HOST.to_string(),
            api_key: api_key.into(),
            version: ANTHROPIC_VERSION.to_string(),
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BraveSearchConfig {
    pub host: String,
    pub api_key: String,
}

impl BraveSearchConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: BRAVE_HOST.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }
}
