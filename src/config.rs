use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    ApiUrl,
    GraphqlUrl,
    Remote,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ApiUrl => "api_url",
            ConfigKey::GraphqlUrl => "graphql_url",
            ConfigKey::Remote => "remote",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::ApiUrl, ConfigKey::GraphqlUrl, ConfigKey::Remote]
    }
}

/// Filename for the project-specific configuration within the .loose_end directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".loose_end";

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REMOTE: &str = "origin";

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns an empty HashMap if the input `content` is empty or contains only whitespace.
/// - Unknown keys are skipped.
/// - Returns an `Err` if the JSON parsing fails or the top level is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    let mut config_map = HashMap::new();

    if let Value::Object(map) = &value {
        for key in ConfigKey::all() {
            if let Some(val) = map.get(key.as_str()) {
                config_map.insert(*key, val.clone());
            }
        }
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be a JSON object"))
}

/// Resolved settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// REST API base URL, without a trailing slash
    pub api_url: String,
    /// GraphQL endpoint
    pub graphql_url: String,
    /// Git remote naming the GitHub repository
    pub remote: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            graphql_url: format!("{DEFAULT_API_URL}/graphql"),
            remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

impl Settings {
    /// Builds settings from a parsed config map, filling in defaults.
    pub fn from_map(config: &HashMap<ConfigKey, Value>) -> Result<Self> {
        let api_url = string_value(config, ConfigKey::ApiUrl)?
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        let graphql_url = match string_value(config, ConfigKey::GraphqlUrl)? {
            Some(url) => url.to_string(),
            None => format!("{api_url}/graphql"),
        };
        let remote = string_value(config, ConfigKey::Remote)?
            .unwrap_or(DEFAULT_REMOTE)
            .to_string();

        Ok(Settings {
            api_url,
            graphql_url,
            remote,
        })
    }

    /// Loads `<root>/.loose_end/config.json`, or defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = parse_config(&content)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        Self::from_map(&config)
    }
}

fn string_value(config: &HashMap<ConfigKey, Value>, key: ConfigKey) -> Result<Option<&str>> {
    match config.get(&key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(anyhow::anyhow!(
            "Config key '{}' must be a string, got {other}",
            key.as_str()
        )),
    }
}
