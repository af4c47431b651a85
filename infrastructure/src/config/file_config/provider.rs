//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// Which model backend to talk to and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Preset id: "anthropic", "openai", "deepseek", ..., or "custom".
    pub kind: String,
    /// Model name. Defaults to the preset's model.
    pub model: Option<String>,
    /// Direct API key. Prefer `api_key_env`.
    pub api_key: Option<String>,
    /// Environment variable holding the key. Defaults to the preset's.
    pub api_key_env: Option<String>,
    /// Endpoint base URL. Required for "custom", optional override otherwise.
    pub base_url: Option<String>,
    /// Max tokens per response.
    pub max_tokens: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: "anthropic".to_string(),
            model: None,
            api_key: None,
            api_key_env: None,
            base_url: None,
            max_tokens: 4096,
        }
    }
}
