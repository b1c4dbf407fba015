use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use scout::providers::configs::{
    AnthropicProviderConfig, BraveSearchConfig, ANTHROPIC_HOST, ANTHROPIC_VERSION, BRAVE_HOST,
};
use serde::Deserialize;
use std::env;
use std::net::{AddrParseError, SocketAddr};

/// Conventional variables read when the prefixed ones are not set
const FALLBACK_ENV_VARS: &[(&str, &str)] = &[
    ("anthropic.api_key", "ANTHROPIC_API_KEY"),
    ("brave.api_key", "BRAVE_API_KEY"),
    ("server.port", "PORT"),
];

#[derive(Debug, Default, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Deserialize)]
pub struct AnthropicSettings {
    #[serde(default = "default_anthropic_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_anthropic_version")]
    pub version: String,
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            host: default_anthropic_host(),
            api_key: None,
            version: default_anthropic_version(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BraveSettings {
    #[serde(default = "default_brave_host")]
    pub host: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for BraveSettings {
    fn default() -> Self {
        Self {
            host: default_brave_host(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_web_search")]
    pub web_search: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            web_search: default_web_search(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub anthropic: AnthropicSettings,
    #[serde(default)]
    pub brave: BraveSettings,
    #[serde(default)]
    pub tools: ToolSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("anthropic.host", default_anthropic_host())?
            .set_default("anthropic.version", default_anthropic_version())?
            .set_default("brave.host", default_brave_host())?
            .set_default("tools.web_search", default_web_search())?;

        for (key, var) in FALLBACK_ENV_VARS {
            if let Ok(value) = env::var(var) {
                builder = builder.set_default(*key, value)?;
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix("SCOUT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            if let config::ConfigError::NotFound(field) = &err {
                ConfigError::MissingEnvVar {
                    env_var: to_env_var(field),
                }
            } else {
                ConfigError::Other(err)
            }
        })?;

        for (key, var) in [
            (&settings.anthropic.api_key, "ANTHROPIC_API_KEY"),
            (&settings.brave.api_key, "BRAVE_API_KEY"),
        ] {
            if key.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::MissingEnvVar {
                    env_var: var.to_string(),
                });
            }
        }

        Ok(settings)
    }

    pub fn anthropic_config(&self) -> AnthropicProviderConfig {
        let api_key = self.anthropic.api_key.clone().unwrap_or_default();
        let mut config = AnthropicProviderConfig::new(api_key).with_host(&self.anthropic.host);
        config.version = self.anthropic.version.clone();
        config
    }

    pub fn brave_config(&self) -> BraveSearchConfig {
        let api_key = self.brave.api_key.clone().unwrap_or_default();
        BraveSearchConfig::new(api_key).with_host(&self.brave.host)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_anthropic_host() -> String {
    ANTHROPIC_HOST.to_string()
}

fn default_anthropic_version() -> String {
    ANTHROPIC_VERSION.to_string()
}

fn default_brave_host() -> String {
    BRAVE_HOST.to_string()
}

fn default_web_search() -> bool {
    true
}
