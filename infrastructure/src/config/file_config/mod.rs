//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys fall back to `Default`.

mod audit;
mod network;
mod provider;
mod sources;

pub use audit::FileAuditConfig;
pub use network::FileNetworkConfig;
pub use provider::FileProviderConfig;
pub use sources::{FileApiConfig, FileCodeIndexConfig, FileLogsConfig, FileSourceConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("provider.model cannot be empty")]
    EmptyModelName,

    #[error("provider.max_tokens cannot be 0")]
    InvalidMaxTokens,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model backend
    pub provider: FileProviderConfig,
    /// Host source tree
    pub source: FileSourceConfig,
    /// Host log files
    pub logs: FileLogsConfig,
    /// Host API document and base URL
    pub api: FileApiConfig,
    /// Optional code index
    pub code_index: FileCodeIndexConfig,
    /// Session audit files
    pub audit: FileAuditConfig,
    /// Deadlines
    pub network: FileNetworkConfig,
}

impl FileConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.network.provider_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "network.provider_timeout_secs",
            ));
        }
        if self.network.tool_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "network.tool_timeout_secs",
            ));
        }
        if let Some(model) = &self.provider.model
            && model.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.provider.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        Ok(())
    }

    /// Copy with the API key masked, for `--show-config`.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.provider.api_key.is_some() {
            copy.provider.api_key = Some("***".to_string());
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
kind = "deepseek"
model = "deepseek-coder"
api_key_env = "MY_DS_KEY"

[source]
path = "/srv/shop"

[logs]
files = ["/var/log/shop/app.log", "/var/log/shop/worker.log"]

[api]
spec = "openapi.yaml"
host_base_url = "http://localhost:8080"

[audit]
enabled = false

[network]
tool_timeout_secs = 5
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.kind, "deepseek");
        assert_eq!(config.provider.model.as_deref(), Some("deepseek-coder"));
        assert_eq!(config.provider.api_key_env.as_deref(), Some("MY_DS_KEY"));
        assert_eq!(config.source.path, PathBuf::from("/srv/shop"));
        assert_eq!(config.logs.files.len(), 2);
        assert_eq!(config.api.spec, Some(PathBuf::from("openapi.yaml")));
        assert!(!config.audit.enabled);
        assert_eq!(config.network.tool_timeout_secs, 5);
        assert_eq!(config.network.provider_timeout_secs, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.provider.kind, "anthropic");
        assert_eq!(config.provider.max_tokens, 4096);
        assert_eq!(config.source.path, PathBuf::from("."));
        assert!(config.logs.files.is_empty());
        assert!(config.api.spec.is_none());
        assert!(config.audit.enabled);
        assert_eq!(config.audit.dir, PathBuf::from("./sessions"));
        assert_eq!(config.network.provider_timeout_secs, 120);
        assert_eq!(config.network.tool_timeout_secs, 30);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[network]\nprovider_timeout_secs = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout(
                "network.provider_timeout_secs"
            ))
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let config: FileConfig = toml::from_str("[provider]\nmodel = \" \"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_redacted_masks_key() {
        let mut config = FileConfig::default();
        config.provider.api_key = Some("sk-secret".to_string());
        assert_eq!(config.redacted().provider.api_key.as_deref(), Some("***"));
    }
}
